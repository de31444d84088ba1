//! Cell-message wire codec and handler routing.

pub mod codec;
pub mod errors;
pub mod router;

pub use codec::{
    BATCH_HEADER_LEN, CELL_MESSAGE_HEADER_LEN, CELL_MESSAGE_VERSION, CellMessageEntry, MAX_BATCH_SIZE,
    decode_batch, decode_cell_message, encode_batch, encode_cell_message,
};
pub use errors::CellMsgError;
pub use router::{CellHandler, CellMessageRouter, HandlerError, RouteOutcome};
