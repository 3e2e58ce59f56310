//! Decoded instruction records

use crate::arch::w65c816::{AddressingMode, Mnemonic};
use crate::memory::SnesAddress;
use serde::Serialize;

/// One decoded instruction, or a data byte standing in for one.
///
/// Instructions are plain data and never change after decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    address: SnesAddress,
    opcode: u8,
    mnemonic: Mnemonic,
    operands: Vec<u8>,
    addressing_mode: AddressingMode,
    size_bytes: u8,
    cycles: u8,
    target: Option<SnesAddress>,
    is_branch: bool,
    is_call: bool,
    is_return: bool,
    is_jump: bool,
}

impl Instruction {
    pub(crate) fn from_parts(
        address: SnesAddress,
        opcode: u8,
        mnemonic: Mnemonic,
        operands: Vec<u8>,
        addressing_mode: AddressingMode,
        cycles: u8,
    ) -> Self {
        Instruction {
            address,
            opcode,
            mnemonic,
            size_bytes: 1 + operands.len() as u8,
            operands,
            addressing_mode,
            cycles,
            target: None,
            is_branch: mnemonic.is_branch(),
            is_call: mnemonic.is_call(),
            is_return: mnemonic.is_return(),
            is_jump: mnemonic.is_jump(),
        }
    }

    pub(crate) fn with_target(mut self, target: Option<SnesAddress>) -> Self {
        self.target = target;
        self
    }

    /// Construct the one-byte placeholder emitted for undecodable bytes.
    pub fn data_byte(address: SnesAddress, byte: u8) -> Self {
        Instruction::from_parts(
            address,
            byte,
            Mnemonic::Db,
            Vec::new(),
            AddressingMode::Implied,
            0,
        )
    }

    pub fn address(&self) -> SnesAddress {
        self.address
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn as_operands(&self) -> &[u8] {
        &self.operands
    }

    pub fn addressing_mode(&self) -> AddressingMode {
        self.addressing_mode
    }

    pub fn size_bytes(&self) -> u8 {
        self.size_bytes
    }

    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    /// The statically known address this instruction refers to.
    pub fn target(&self) -> Option<SnesAddress> {
        self.target
    }

    pub fn is_branch(&self) -> bool {
        self.is_branch
    }

    pub fn is_call(&self) -> bool {
        self.is_call
    }

    pub fn is_return(&self) -> bool {
        self.is_return
    }

    pub fn is_jump(&self) -> bool {
        self.is_jump
    }

    /// Determine if this is a data byte rather than a decoded instruction.
    pub fn is_placeholder(&self) -> bool {
        self.mnemonic == Mnemonic::Db
    }

    /// All bytes of the instruction, opcode first.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size_bytes as usize);
        bytes.push(self.opcode);
        bytes.extend_from_slice(&self.operands);
        bytes
    }

    /// The operand as a little-endian integer, if there is one.
    pub fn operand_value(&self) -> Option<u32> {
        if self.operands.is_empty() {
            return None;
        }

        Some(
            self.operands
                .iter()
                .rev()
                .fold(0u32, |acc, &b| acc << 8 | b as u32),
        )
    }

    /// Address of the instruction that follows this one, within the bank.
    pub fn next_address(&self) -> SnesAddress {
        self.address.wrapping_add_offset(self.size_bytes as i32)
    }
}
