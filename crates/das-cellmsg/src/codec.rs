//! Big-endian wire codec for cell messages and batches.
//!
//! ```text
//! cell_message := version:1 | cell_idx:2 | column_idx:2 | row_idx:2 | data_len:4 | proof_len:2 | data | proof
//! batch        := version:1 | count:4 | repeated [ msg_len:4 | cell_message ]
//! ```

use das_field::BYTES_PER_CELL;
use das_matrix::{CELLS_PER_EXT_BLOB, MAX_BLOB_COMMITMENTS_PER_BLOCK, NUMBER_OF_COLUMNS};

use crate::errors::CellMsgError;

pub const CELL_MESSAGE_VERSION: u8 = 0x01;
pub const CELL_MESSAGE_HEADER_LEN: usize = 13;
pub const BATCH_HEADER_LEN: usize = 5;
pub const MAX_BATCH_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMessageEntry {
    pub cell_idx: u16,
    pub column_idx: u16,
    pub row_idx: u16,
    pub data: Vec<u8>,
    pub proof: Vec<u8>,
}

impl CellMessageEntry {
    pub fn new(cell_idx: u16, column_idx: u16, row_idx: u16, data: Vec<u8>, proof: Vec<u8>) -> Self {
        Self {
            cell_idx,
            column_idx,
            row_idx,
            data,
            proof,
        }
    }

    fn validate(&self) -> Result<(), CellMsgError> {
        if self.cell_idx as usize >= CELLS_PER_EXT_BLOB {
            return Err(CellMsgError::CellIdxOOB(self.cell_idx));
        }
        if self.column_idx as u64 >= NUMBER_OF_COLUMNS {
            return Err(CellMsgError::ColumnIdxOOB(self.column_idx));
        }
        if self.row_idx as usize >= MAX_BLOB_COMMITMENTS_PER_BLOCK {
            return Err(CellMsgError::RowIdxOOB(self.row_idx));
        }
        if self.data.is_empty() {
            return Err(CellMsgError::EmptyData);
        }
        if self.data.len() > BYTES_PER_CELL {
            return Err(CellMsgError::DataTooLarge(self.data.len()));
        }
        if self.proof.len() > 48 {
            return Err(CellMsgError::ProofTooLarge(self.proof.len()));
        }
        Ok(())
    }
}

pub fn encode_cell_message(msg: &CellMessageEntry) -> Vec<u8> {
    let mut out = Vec::with_capacity(CELL_MESSAGE_HEADER_LEN + msg.data.len() + msg.proof.len());
    out.push(CELL_MESSAGE_VERSION);
    out.extend_from_slice(&msg.cell_idx.to_be_bytes());
    out.extend_from_slice(&msg.column_idx.to_be_bytes());
    out.extend_from_slice(&msg.row_idx.to_be_bytes());
    out.extend_from_slice(&(msg.data.len() as u32).to_be_bytes());
    out.extend_from_slice(&(msg.proof.len() as u16).to_be_bytes());
    out.extend_from_slice(&msg.data);
    out.extend_from_slice(&msg.proof);
    out
}

pub fn decode_cell_message(bytes: &[u8]) -> Result<CellMessageEntry, CellMsgError> {
    if bytes.len() < CELL_MESSAGE_HEADER_LEN {
        return Err(CellMsgError::CellMsgDecode("truncated header".into()));
    }

    let version = bytes[0];
    if version != CELL_MESSAGE_VERSION {
        return Err(CellMsgError::CellMsgVersion(version));
    }

    let cell_idx = u16::from_be_bytes([bytes[1], bytes[2]]);
    let column_idx = u16::from_be_bytes([bytes[3], bytes[4]]);
    let row_idx = u16::from_be_bytes([bytes[5], bytes[6]]);
    let data_len = u32::from_be_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]) as usize;
    let proof_len = u16::from_be_bytes([bytes[11], bytes[12]]) as usize;

    let data_start = CELL_MESSAGE_HEADER_LEN;
    let data_end = data_start + data_len;
    let proof_end = data_end + proof_len;

    if bytes.len() < proof_end {
        return Err(CellMsgError::CellMsgDecode("truncated body".into()));
    }

    let msg = CellMessageEntry {
        cell_idx,
        column_idx,
        row_idx,
        data: bytes[data_start..data_end].to_vec(),
        proof: bytes[data_end..proof_end].to_vec(),
    };
    msg.validate()?;
    Ok(msg)
}

pub fn encode_batch(msgs: &[CellMessageEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    out.push(CELL_MESSAGE_VERSION);
    out.extend_from_slice(&(msgs.len() as u32).to_be_bytes());
    for msg in msgs {
        let encoded = encode_cell_message(msg);
        out.extend_from_slice(&(encoded.len() as u32).to_be_bytes());
        out.extend_from_slice(&encoded);
    }
    out
}

pub fn decode_batch(bytes: &[u8]) -> Result<Vec<CellMessageEntry>, CellMsgError> {
    if bytes.len() < BATCH_HEADER_LEN {
        return Err(CellMsgError::BatchDecode("truncated batch header".into()));
    }

    let version = bytes[0];
    if version != CELL_MESSAGE_VERSION {
        return Err(CellMsgError::CellMsgVersion(version));
    }

    let count = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
    if count > MAX_BATCH_SIZE {
        return Err(CellMsgError::BatchDecode(format!(
            "batch of {count} exceeds MAX_BATCH_SIZE ({MAX_BATCH_SIZE})"
        )));
    }

    let mut offset = BATCH_HEADER_LEN;
    let mut msgs = Vec::with_capacity(count);
    for _ in 0..count {
        if bytes.len() < offset + 4 {
            return Err(CellMsgError::BatchDecode("truncated message length".into()));
        }
        let msg_len = u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]]) as usize;
        offset += 4;

        if bytes.len() < offset + msg_len {
            return Err(CellMsgError::BatchDecode("truncated message body".into()));
        }
        let msg = decode_cell_message(&bytes[offset..offset + msg_len]).map_err(|e| CellMsgError::BatchDecode(e.to_string()))?;
        msgs.push(msg);
        offset += msg_len;
    }

    Ok(msgs)
}
