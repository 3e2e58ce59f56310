//! 65C816 addressing modes

use serde::Serialize;

/// The operand encoding of an instruction.
///
/// Names follow WDC's datasheet, with "direct" meaning the direct page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AddressingMode {
    /// No operand.
    Implied,

    /// Operates on the accumulator: `ASL A`.
    Accumulator,

    /// One immediate byte regardless of CPU mode: `REP #$30`, and the
    /// signature byte of `BRK` and `COP`.
    Immediate,

    /// Immediate whose width follows the accumulator (M flag): `LDA #$12`.
    ImmediateM,

    /// Immediate whose width follows the index registers (X flag): `LDX #$12`.
    ImmediateX,

    /// `$1234`, in the data bank (or program bank for jumps).
    Absolute,

    /// `$1234,X`
    AbsoluteX,

    /// `$1234,Y`
    AbsoluteY,

    /// `$123456`
    AbsoluteLong,

    /// `$123456,X`
    AbsoluteLongX,

    /// `($1234)`, only used by `JMP`.
    AbsoluteIndirect,

    /// `($1234,X)`, only used by `JMP` and `JSR`.
    AbsoluteIndexedIndirect,

    /// `[$1234]`, only used by `JML`.
    AbsoluteIndirectLong,

    /// `$12`
    Direct,

    /// `$12,X`
    DirectX,

    /// `$12,Y`
    DirectY,

    /// `($12)`
    DirectIndirect,

    /// `($12,X)`
    DirectIndexedIndirect,

    /// `($12),Y`
    DirectIndirectIndexed,

    /// `[$12]`
    DirectIndirectLong,

    /// `[$12],Y`
    DirectIndirectLongIndexed,

    /// `$12,S`
    StackRelative,

    /// `($12,S),Y`
    StackRelativeIndirectIndexed,

    /// Signed 8-bit displacement from the next instruction.
    Relative,

    /// Signed 16-bit displacement from the next instruction.
    RelativeLong,

    /// Destination and source bank bytes of `MVN`/`MVP`.
    BlockMove,
}

impl AddressingMode {
    /// Number of operand bytes, with width-dependent immediates at 8 bits.
    pub const fn operand_len(self) -> u8 {
        use AddressingMode::*;

        match self {
            Implied | Accumulator => 0,
            Immediate | ImmediateM | ImmediateX => 1,
            Direct | DirectX | DirectY => 1,
            DirectIndirect | DirectIndexedIndirect | DirectIndirectIndexed => 1,
            DirectIndirectLong | DirectIndirectLongIndexed => 1,
            StackRelative | StackRelativeIndirectIndexed => 1,
            Relative => 1,
            Absolute | AbsoluteX | AbsoluteY => 2,
            AbsoluteIndirect | AbsoluteIndexedIndirect | AbsoluteIndirectLong => 2,
            RelativeLong | BlockMove => 2,
            AbsoluteLong | AbsoluteLongX => 3,
        }
    }

    /// Determine if the operand names a 24-bit address.
    pub fn is_long(self) -> bool {
        matches!(self, AddressingMode::AbsoluteLong | AddressingMode::AbsoluteLongX)
    }

    /// Determine if the operand is a PC-relative displacement.
    pub fn is_relative(self) -> bool {
        matches!(self, AddressingMode::Relative | AddressingMode::RelativeLong)
    }

    /// Determine if the effective address is read out of memory.
    pub fn is_indirect(self) -> bool {
        use AddressingMode::*;

        matches!(
            self,
            AbsoluteIndirect
                | AbsoluteIndexedIndirect
                | AbsoluteIndirectLong
                | DirectIndirect
                | DirectIndexedIndirect
                | DirectIndirectIndexed
                | DirectIndirectLong
                | DirectIndirectLongIndexed
                | StackRelativeIndirectIndexed
        )
    }
}
