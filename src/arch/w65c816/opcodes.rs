//! The 65C816 opcode table.
//!
//! Every opcode byte maps to exactly one mnemonic and addressing mode; the
//! table is indexed directly by opcode and never built at runtime.

use crate::arch::w65c816::AddressingMode;
use crate::arch::w65c816::AddressingMode::*;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

/// All 65C816 instruction mnemonics, plus the `DB` pseudo-op used to mark
/// bytes that could not be decoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Brl,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cop,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jml,
    Jmp,
    Jsl,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Mvn,
    Mvp,
    Nop,
    Ora,
    Pea,
    Pei,
    Per,
    Pha,
    Phb,
    Phd,
    Phk,
    Php,
    Phx,
    Phy,
    Pla,
    Plb,
    Pld,
    Plp,
    Plx,
    Ply,
    Rep,
    Rol,
    Ror,
    Rti,
    Rtl,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sep,
    Sta,
    Stp,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Tcd,
    Tcs,
    Tdc,
    Trb,
    Tsb,
    Tsc,
    Tsx,
    Txa,
    Txs,
    Txy,
    Tya,
    Tyx,
    Wai,
    Xba,
    Xce,

    /// Not an instruction: a byte emitted as data.
    Db,
}

impl Mnemonic {
    pub fn name(self) -> &'static str {
        use Mnemonic::*;

        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Bra => "BRA",
            Brk => "BRK",
            Brl => "BRL",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cop => "COP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jml => "JML",
            Jmp => "JMP",
            Jsl => "JSL",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Mvn => "MVN",
            Mvp => "MVP",
            Nop => "NOP",
            Ora => "ORA",
            Pea => "PEA",
            Pei => "PEI",
            Per => "PER",
            Pha => "PHA",
            Phb => "PHB",
            Phd => "PHD",
            Phk => "PHK",
            Php => "PHP",
            Phx => "PHX",
            Phy => "PHY",
            Pla => "PLA",
            Plb => "PLB",
            Pld => "PLD",
            Plp => "PLP",
            Plx => "PLX",
            Ply => "PLY",
            Rep => "REP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rtl => "RTL",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sep => "SEP",
            Sta => "STA",
            Stp => "STP",
            Stx => "STX",
            Sty => "STY",
            Stz => "STZ",
            Tax => "TAX",
            Tay => "TAY",
            Tcd => "TCD",
            Tcs => "TCS",
            Tdc => "TDC",
            Trb => "TRB",
            Tsb => "TSB",
            Tsc => "TSC",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Txy => "TXY",
            Tya => "TYA",
            Tyx => "TYX",
            Wai => "WAI",
            Xba => "XBA",
            Xce => "XCE",
            Db => "DB",
        }
    }

    /// Conditional and unconditional PC-relative branches.
    pub fn is_branch(self) -> bool {
        use Mnemonic::*;

        matches!(self, Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs | Bra | Brl)
    }

    /// Subroutine calls.
    pub fn is_call(self) -> bool {
        matches!(self, Mnemonic::Jsr | Mnemonic::Jsl)
    }

    /// Absolute or indirect jumps.
    pub fn is_jump(self) -> bool {
        matches!(self, Mnemonic::Jmp | Mnemonic::Jml)
    }

    /// Subroutine and interrupt returns.
    pub fn is_return(self) -> bool {
        matches!(self, Mnemonic::Rts | Mnemonic::Rtl | Mnemonic::Rti)
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Mnemonic> for &'static str {
    fn from(mnemonic: Mnemonic) -> Self {
        mnemonic.name()
    }
}

/// Static decoding information for one opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,

    /// Instruction length, with width-dependent immediates at their 8-bit
    /// size.
    pub size_bytes: u8,

    /// Cycle count for the shortest form of the instruction.
    pub cycles: u8,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpcodeInfo> {
    Some(OpcodeInfo {
        mnemonic,
        mode,
        size_bytes: 1 + mode.operand_len(),
        cycles,
    })
}

/// Look up an opcode.
///
/// Returns `None` for opcodes with no defined meaning. `WDM` (`$42`) is
/// reserved for future expansion and is treated as undefined.
pub fn lookup(opcode: u8) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

use Mnemonic::*;

#[rustfmt::skip]
pub static OPCODE_TABLE: [Option<OpcodeInfo>; 256] = [
    /* 00 */ op(Brk, Immediate, 7),
    /* 01 */ op(Ora, DirectIndexedIndirect, 6),
    /* 02 */ op(Cop, Immediate, 7),
    /* 03 */ op(Ora, StackRelative, 4),
    /* 04 */ op(Tsb, Direct, 5),
    /* 05 */ op(Ora, Direct, 3),
    /* 06 */ op(Asl, Direct, 5),
    /* 07 */ op(Ora, DirectIndirectLong, 6),
    /* 08 */ op(Php, Implied, 3),
    /* 09 */ op(Ora, ImmediateM, 2),
    /* 0A */ op(Asl, Accumulator, 2),
    /* 0B */ op(Phd, Implied, 4),
    /* 0C */ op(Tsb, Absolute, 6),
    /* 0D */ op(Ora, Absolute, 4),
    /* 0E */ op(Asl, Absolute, 6),
    /* 0F */ op(Ora, AbsoluteLong, 5),
    /* 10 */ op(Bpl, Relative, 2),
    /* 11 */ op(Ora, DirectIndirectIndexed, 5),
    /* 12 */ op(Ora, DirectIndirect, 5),
    /* 13 */ op(Ora, StackRelativeIndirectIndexed, 7),
    /* 14 */ op(Trb, Direct, 5),
    /* 15 */ op(Ora, DirectX, 4),
    /* 16 */ op(Asl, DirectX, 6),
    /* 17 */ op(Ora, DirectIndirectLongIndexed, 6),
    /* 18 */ op(Clc, Implied, 2),
    /* 19 */ op(Ora, AbsoluteY, 4),
    /* 1A */ op(Inc, Accumulator, 2),
    /* 1B */ op(Tcs, Implied, 2),
    /* 1C */ op(Trb, Absolute, 6),
    /* 1D */ op(Ora, AbsoluteX, 4),
    /* 1E */ op(Asl, AbsoluteX, 7),
    /* 1F */ op(Ora, AbsoluteLongX, 5),
    /* 20 */ op(Jsr, Absolute, 6),
    /* 21 */ op(And, DirectIndexedIndirect, 6),
    /* 22 */ op(Jsl, AbsoluteLong, 8),
    /* 23 */ op(And, StackRelative, 4),
    /* 24 */ op(Bit, Direct, 3),
    /* 25 */ op(And, Direct, 3),
    /* 26 */ op(Rol, Direct, 5),
    /* 27 */ op(And, DirectIndirectLong, 6),
    /* 28 */ op(Plp, Implied, 4),
    /* 29 */ op(And, ImmediateM, 2),
    /* 2A */ op(Rol, Accumulator, 2),
    /* 2B */ op(Pld, Implied, 5),
    /* 2C */ op(Bit, Absolute, 4),
    /* 2D */ op(And, Absolute, 4),
    /* 2E */ op(Rol, Absolute, 6),
    /* 2F */ op(And, AbsoluteLong, 5),
    /* 30 */ op(Bmi, Relative, 2),
    /* 31 */ op(And, DirectIndirectIndexed, 5),
    /* 32 */ op(And, DirectIndirect, 5),
    /* 33 */ op(And, StackRelativeIndirectIndexed, 7),
    /* 34 */ op(Bit, DirectX, 4),
    /* 35 */ op(And, DirectX, 4),
    /* 36 */ op(Rol, DirectX, 6),
    /* 37 */ op(And, DirectIndirectLongIndexed, 6),
    /* 38 */ op(Sec, Implied, 2),
    /* 39 */ op(And, AbsoluteY, 4),
    /* 3A */ op(Dec, Accumulator, 2),
    /* 3B */ op(Tsc, Implied, 2),
    /* 3C */ op(Bit, AbsoluteX, 4),
    /* 3D */ op(And, AbsoluteX, 4),
    /* 3E */ op(Rol, AbsoluteX, 7),
    /* 3F */ op(And, AbsoluteLongX, 5),
    /* 40 */ op(Rti, Implied, 6),
    /* 41 */ op(Eor, DirectIndexedIndirect, 6),
    /* 42 */ None,
    /* 43 */ op(Eor, StackRelative, 4),
    /* 44 */ op(Mvp, BlockMove, 7),
    /* 45 */ op(Eor, Direct, 3),
    /* 46 */ op(Lsr, Direct, 5),
    /* 47 */ op(Eor, DirectIndirectLong, 6),
    /* 48 */ op(Pha, Implied, 3),
    /* 49 */ op(Eor, ImmediateM, 2),
    /* 4A */ op(Lsr, Accumulator, 2),
    /* 4B */ op(Phk, Implied, 3),
    /* 4C */ op(Jmp, Absolute, 3),
    /* 4D */ op(Eor, Absolute, 4),
    /* 4E */ op(Lsr, Absolute, 6),
    /* 4F */ op(Eor, AbsoluteLong, 5),
    /* 50 */ op(Bvc, Relative, 2),
    /* 51 */ op(Eor, DirectIndirectIndexed, 5),
    /* 52 */ op(Eor, DirectIndirect, 5),
    /* 53 */ op(Eor, StackRelativeIndirectIndexed, 7),
    /* 54 */ op(Mvn, BlockMove, 7),
    /* 55 */ op(Eor, DirectX, 4),
    /* 56 */ op(Lsr, DirectX, 6),
    /* 57 */ op(Eor, DirectIndirectLongIndexed, 6),
    /* 58 */ op(Cli, Implied, 2),
    /* 59 */ op(Eor, AbsoluteY, 4),
    /* 5A */ op(Phy, Implied, 3),
    /* 5B */ op(Tcd, Implied, 2),
    /* 5C */ op(Jml, AbsoluteLong, 4),
    /* 5D */ op(Eor, AbsoluteX, 4),
    /* 5E */ op(Lsr, AbsoluteX, 7),
    /* 5F */ op(Eor, AbsoluteLongX, 5),
    /* 60 */ op(Rts, Implied, 6),
    /* 61 */ op(Adc, DirectIndexedIndirect, 6),
    /* 62 */ op(Per, RelativeLong, 6),
    /* 63 */ op(Adc, StackRelative, 4),
    /* 64 */ op(Stz, Direct, 3),
    /* 65 */ op(Adc, Direct, 3),
    /* 66 */ op(Ror, Direct, 5),
    /* 67 */ op(Adc, DirectIndirectLong, 6),
    /* 68 */ op(Pla, Implied, 4),
    /* 69 */ op(Adc, ImmediateM, 2),
    /* 6A */ op(Ror, Accumulator, 2),
    /* 6B */ op(Rtl, Implied, 6),
    /* 6C */ op(Jmp, AbsoluteIndirect, 5),
    /* 6D */ op(Adc, Absolute, 4),
    /* 6E */ op(Ror, Absolute, 6),
    /* 6F */ op(Adc, AbsoluteLong, 5),
    /* 70 */ op(Bvs, Relative, 2),
    /* 71 */ op(Adc, DirectIndirectIndexed, 5),
    /* 72 */ op(Adc, DirectIndirect, 5),
    /* 73 */ op(Adc, StackRelativeIndirectIndexed, 7),
    /* 74 */ op(Stz, DirectX, 4),
    /* 75 */ op(Adc, DirectX, 4),
    /* 76 */ op(Ror, DirectX, 6),
    /* 77 */ op(Adc, DirectIndirectLongIndexed, 6),
    /* 78 */ op(Sei, Implied, 2),
    /* 79 */ op(Adc, AbsoluteY, 4),
    /* 7A */ op(Ply, Implied, 4),
    /* 7B */ op(Tdc, Implied, 2),
    /* 7C */ op(Jmp, AbsoluteIndexedIndirect, 6),
    /* 7D */ op(Adc, AbsoluteX, 4),
    /* 7E */ op(Ror, AbsoluteX, 7),
    /* 7F */ op(Adc, AbsoluteLongX, 5),
    /* 80 */ op(Bra, Relative, 3),
    /* 81 */ op(Sta, DirectIndexedIndirect, 6),
    /* 82 */ op(Brl, RelativeLong, 4),
    /* 83 */ op(Sta, StackRelative, 4),
    /* 84 */ op(Sty, Direct, 3),
    /* 85 */ op(Sta, Direct, 3),
    /* 86 */ op(Stx, Direct, 3),
    /* 87 */ op(Sta, DirectIndirectLong, 6),
    /* 88 */ op(Dey, Implied, 2),
    /* 89 */ op(Bit, ImmediateM, 2),
    /* 8A */ op(Txa, Implied, 2),
    /* 8B */ op(Phb, Implied, 3),
    /* 8C */ op(Sty, Absolute, 4),
    /* 8D */ op(Sta, Absolute, 4),
    /* 8E */ op(Stx, Absolute, 4),
    /* 8F */ op(Sta, AbsoluteLong, 5),
    /* 90 */ op(Bcc, Relative, 2),
    /* 91 */ op(Sta, DirectIndirectIndexed, 6),
    /* 92 */ op(Sta, DirectIndirect, 5),
    /* 93 */ op(Sta, StackRelativeIndirectIndexed, 7),
    /* 94 */ op(Sty, DirectX, 4),
    /* 95 */ op(Sta, DirectX, 4),
    /* 96 */ op(Stx, DirectY, 4),
    /* 97 */ op(Sta, DirectIndirectLongIndexed, 6),
    /* 98 */ op(Tya, Implied, 2),
    /* 99 */ op(Sta, AbsoluteY, 5),
    /* 9A */ op(Txs, Implied, 2),
    /* 9B */ op(Txy, Implied, 2),
    /* 9C */ op(Stz, Absolute, 4),
    /* 9D */ op(Sta, AbsoluteX, 5),
    /* 9E */ op(Stz, AbsoluteX, 5),
    /* 9F */ op(Sta, AbsoluteLongX, 5),
    /* A0 */ op(Ldy, ImmediateX, 2),
    /* A1 */ op(Lda, DirectIndexedIndirect, 6),
    /* A2 */ op(Ldx, ImmediateX, 2),
    /* A3 */ op(Lda, StackRelative, 4),
    /* A4 */ op(Ldy, Direct, 3),
    /* A5 */ op(Lda, Direct, 3),
    /* A6 */ op(Ldx, Direct, 3),
    /* A7 */ op(Lda, DirectIndirectLong, 6),
    /* A8 */ op(Tay, Implied, 2),
    /* A9 */ op(Lda, ImmediateM, 2),
    /* AA */ op(Tax, Implied, 2),
    /* AB */ op(Plb, Implied, 4),
    /* AC */ op(Ldy, Absolute, 4),
    /* AD */ op(Lda, Absolute, 4),
    /* AE */ op(Ldx, Absolute, 4),
    /* AF */ op(Lda, AbsoluteLong, 5),
    /* B0 */ op(Bcs, Relative, 2),
    /* B1 */ op(Lda, DirectIndirectIndexed, 5),
    /* B2 */ op(Lda, DirectIndirect, 5),
    /* B3 */ op(Lda, StackRelativeIndirectIndexed, 7),
    /* B4 */ op(Ldy, DirectX, 4),
    /* B5 */ op(Lda, DirectX, 4),
    /* B6 */ op(Ldx, DirectY, 4),
    /* B7 */ op(Lda, DirectIndirectLongIndexed, 6),
    /* B8 */ op(Clv, Implied, 2),
    /* B9 */ op(Lda, AbsoluteY, 4),
    /* BA */ op(Tsx, Implied, 2),
    /* BB */ op(Tyx, Implied, 2),
    /* BC */ op(Ldy, AbsoluteX, 4),
    /* BD */ op(Lda, AbsoluteX, 4),
    /* BE */ op(Ldx, AbsoluteY, 4),
    /* BF */ op(Lda, AbsoluteLongX, 5),
    /* C0 */ op(Cpy, ImmediateX, 2),
    /* C1 */ op(Cmp, DirectIndexedIndirect, 6),
    /* C2 */ op(Rep, Immediate, 3),
    /* C3 */ op(Cmp, StackRelative, 4),
    /* C4 */ op(Cpy, Direct, 3),
    /* C5 */ op(Cmp, Direct, 3),
    /* C6 */ op(Dec, Direct, 5),
    /* C7 */ op(Cmp, DirectIndirectLong, 6),
    /* C8 */ op(Iny, Implied, 2),
    /* C9 */ op(Cmp, ImmediateM, 2),
    /* CA */ op(Dex, Implied, 2),
    /* CB */ op(Wai, Implied, 3),
    /* CC */ op(Cpy, Absolute, 4),
    /* CD */ op(Cmp, Absolute, 4),
    /* CE */ op(Dec, Absolute, 6),
    /* CF */ op(Cmp, AbsoluteLong, 5),
    /* D0 */ op(Bne, Relative, 2),
    /* D1 */ op(Cmp, DirectIndirectIndexed, 5),
    /* D2 */ op(Cmp, DirectIndirect, 5),
    /* D3 */ op(Cmp, StackRelativeIndirectIndexed, 7),
    /* D4 */ op(Pei, DirectIndirect, 6),
    /* D5 */ op(Cmp, DirectX, 4),
    /* D6 */ op(Dec, DirectX, 6),
    /* D7 */ op(Cmp, DirectIndirectLongIndexed, 6),
    /* D8 */ op(Cld, Implied, 2),
    /* D9 */ op(Cmp, AbsoluteY, 4),
    /* DA */ op(Phx, Implied, 3),
    /* DB */ op(Stp, Implied, 3),
    /* DC */ op(Jml, AbsoluteIndirectLong, 6),
    /* DD */ op(Cmp, AbsoluteX, 4),
    /* DE */ op(Dec, AbsoluteX, 7),
    /* DF */ op(Cmp, AbsoluteLongX, 5),
    /* E0 */ op(Cpx, ImmediateX, 2),
    /* E1 */ op(Sbc, DirectIndexedIndirect, 6),
    /* E2 */ op(Sep, Immediate, 3),
    /* E3 */ op(Sbc, StackRelative, 4),
    /* E4 */ op(Cpx, Direct, 3),
    /* E5 */ op(Sbc, Direct, 3),
    /* E6 */ op(Inc, Direct, 5),
    /* E7 */ op(Sbc, DirectIndirectLong, 6),
    /* E8 */ op(Inx, Implied, 2),
    /* E9 */ op(Sbc, ImmediateM, 2),
    /* EA */ op(Nop, Implied, 2),
    /* EB */ op(Xba, Implied, 3),
    /* EC */ op(Cpx, Absolute, 4),
    /* ED */ op(Sbc, Absolute, 4),
    /* EE */ op(Inc, Absolute, 6),
    /* EF */ op(Sbc, AbsoluteLong, 5),
    /* F0 */ op(Beq, Relative, 2),
    /* F1 */ op(Sbc, DirectIndirectIndexed, 5),
    /* F2 */ op(Sbc, DirectIndirect, 5),
    /* F3 */ op(Sbc, StackRelativeIndirectIndexed, 7),
    /* F4 */ op(Pea, Absolute, 5),
    /* F5 */ op(Sbc, DirectX, 4),
    /* F6 */ op(Inc, DirectX, 6),
    /* F7 */ op(Sbc, DirectIndirectLongIndexed, 6),
    /* F8 */ op(Sed, Implied, 2),
    /* F9 */ op(Sbc, AbsoluteY, 4),
    /* FA */ op(Plx, Implied, 4),
    /* FB */ op(Xce, Implied, 2),
    /* FC */ op(Jsr, AbsoluteIndexedIndirect, 8),
    /* FD */ op(Sbc, AbsoluteX, 4),
    /* FE */ op(Inc, AbsoluteX, 7),
    /* FF */ op(Sbc, AbsoluteLongX, 5),
];
