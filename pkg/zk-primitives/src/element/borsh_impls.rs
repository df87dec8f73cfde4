use std::io::{Read, Result, Write};

use borsh::{BorshDeserialize, BorshSerialize};

use super::Element;

/// Always 32 big-endian bytes, the same layout as [`Element::to_be_bytes`]
impl BorshSerialize for Element {
    fn serialize<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_be_bytes())
    }
}

impl BorshDeserialize for Element {
    fn deserialize_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0; 32];
        reader.read_exact(&mut bytes)?;
        Ok(Self::from_be_bytes(bytes))
    }
}
