//! Per-value metadata flags.
//!
//! Besides nullability these record where a value came from (hex or bit
//! literal) and whether an integer sits on a 64-bit boundary that needs
//! special handling when negated.

use bitflags::bitflags;

/// `i64::MAX + 1` as an unsigned value: the magnitude of `i64::MIN`.
pub const SIGNED_CAP: u64 = (i64::MAX as u64) + 1;

bitflags! {
    /// Metadata carried alongside a value's payload.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ValueFlags: u16 {
        /// The value is SQL NULL. Implies `NULLABLE`.
        const NULL = 1 << 0;
        /// The value may be NULL.
        const NULLABLE = 1 << 1;

        // === Integer boundaries (mutually exclusive) ===

        /// Exactly `i64::MIN`; negation underflows.
        const INTEGER_UDF = 1 << 5;
        /// Exactly `i64::MAX + 1` stored unsigned; negates to `i64::MIN`.
        const INTEGER_CAP = 1 << 6;
        /// Unsigned above `i64::MAX + 1`; negation overflows.
        const INTEGER_OVF = 1 << 7;

        // === Literal origin ===

        /// Produced by a hex literal (`0x41`, `X'41'`).
        const HEX = 1 << 8;
        /// Produced by a bit literal (`b'01'`).
        const BIT = 1 << 9;

        /// All integer boundary markers.
        const INTEGER_RANGE = Self::INTEGER_UDF.bits()
            | Self::INTEGER_CAP.bits()
            | Self::INTEGER_OVF.bits();
    }
}

impl ValueFlags {
    /// Boundary marker for a signed value.
    #[inline]
    pub const fn for_int64(i: i64) -> ValueFlags {
        if i == i64::MIN {
            ValueFlags::INTEGER_UDF
        } else {
            ValueFlags::empty()
        }
    }

    /// Boundary marker for an unsigned value.
    #[inline]
    pub const fn for_uint64(u: u64) -> ValueFlags {
        if u == SIGNED_CAP {
            ValueFlags::INTEGER_CAP
        } else if u > SIGNED_CAP {
            ValueFlags::INTEGER_OVF
        } else {
            ValueFlags::empty()
        }
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.contains(ValueFlags::NULL)
    }

    #[inline]
    pub const fn is_nullable(self) -> bool {
        self.contains(ValueFlags::NULLABLE)
    }
}
