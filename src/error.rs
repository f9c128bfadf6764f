//! Error types and client status codes for S7 multi-variable transfers.
//!
//! Every error maps to a 32-bit client status code through [`S7Error::code`].
//! These are the codes the transport layer reports for whole transactions and
//! the codes stored per item in [`MultiVar::results`](crate::MultiVar::results).

use thiserror::Error;

/// Result type alias for S7 multi-variable operations.
pub type Result<T> = std::result::Result<T, S7Error>;

/// Numeric client status codes.
///
/// The high word carries the client error class; `0` always means success.
pub mod codes {
    /// Socket could not be created.
    pub const TCP_SOCKET_CREATION: i32 = 0x0000_0001;
    /// Connection attempt timed out.
    pub const TCP_CONNECTION_TIMEOUT: i32 = 0x0000_0002;
    /// Connection attempt failed.
    pub const TCP_CONNECTION_FAILED: i32 = 0x0000_0003;
    /// Receive timed out.
    pub const TCP_RECEIVE_TIMEOUT: i32 = 0x0000_0004;
    /// Error while receiving data.
    pub const TCP_DATA_RECEIVE: i32 = 0x0000_0005;
    /// Send timed out.
    pub const TCP_SEND_TIMEOUT: i32 = 0x0000_0006;
    /// Error while sending data.
    pub const TCP_DATA_SEND: i32 = 0x0000_0007;
    /// Connection reset by peer.
    pub const TCP_CONNECTION_RESET: i32 = 0x0000_0008;
    /// Client not connected.
    pub const TCP_NOT_CONNECTED: i32 = 0x0000_0009;
    /// Host unreachable.
    pub const TCP_UNREACHABLE_HOST: i32 = 0x0000_2751;
    /// ISO connection failed.
    pub const ISO_CONNECT: i32 = 0x0001_0000;
    /// Malformed ISO PDU.
    pub const ISO_INVALID_PDU: i32 = 0x0003_0000;
    /// Bad ISO data size.
    pub const ISO_INVALID_DATA_SIZE: i32 = 0x0004_0000;
    /// PDU length negotiation failed.
    pub const NEGOTIATING_PDU: i32 = 0x0010_0000;
    /// Invalid parameters.
    pub const INVALID_PARAMS: i32 = 0x0020_0000;
    /// A job is already pending.
    pub const JOB_PENDING: i32 = 0x0030_0000;
    /// Too many items in one multi-variable request.
    pub const TOO_MANY_ITEMS: i32 = 0x0040_0000;
    /// Invalid word length.
    pub const INVALID_WORD_LEN: i32 = 0x0050_0000;
    /// Only part of the data was written.
    pub const PARTIAL_DATA_WRITTEN: i32 = 0x0060_0000;
    /// Request exceeds the negotiated PDU size.
    pub const SIZE_OVER_PDU: i32 = 0x0070_0000;
    /// Unexpected answer from the controller.
    pub const INVALID_PLC_ANSWER: i32 = 0x0080_0000;
    /// Address out of range.
    pub const ADDRESS_OUT_OF_RANGE: i32 = 0x0090_0000;
    /// Invalid transport size.
    pub const INVALID_TRANSPORT_SIZE: i32 = 0x00A0_0000;
    /// Write data size mismatch.
    pub const WRITE_DATA_SIZE_MISMATCH: i32 = 0x00B0_0000;
    /// Item not available.
    pub const ITEM_NOT_AVAILABLE: i32 = 0x00C0_0000;
    /// Invalid value supplied.
    pub const INVALID_VALUE: i32 = 0x00D0_0000;
    /// Function not available.
    pub const FUNCTION_NOT_AVAILABLE: i32 = 0x0140_0000;
    /// Password required.
    pub const NEED_PASSWORD: i32 = 0x01D0_0000;
    /// Invalid password.
    pub const INVALID_PASSWORD: i32 = 0x01E0_0000;
    /// No password to set or clear.
    pub const NO_PASSWORD_TO_SET_OR_CLEAR: i32 = 0x01F0_0000;
    /// Job timed out.
    pub const JOB_TIMEOUT: i32 = 0x0200_0000;
    /// Only part of the data was read.
    pub const PARTIAL_DATA_READ: i32 = 0x0210_0000;
    /// Caller buffer too small.
    pub const BUFFER_TOO_SMALL: i32 = 0x0220_0000;
    /// Function refused by the client.
    pub const FUNCTION_REFUSED: i32 = 0x0230_0000;
}

/// Errors that can occur while building or running a multi-variable transaction.
#[derive(Debug, Error)]
pub enum S7Error {
    /// The batch already holds its maximum number of items.
    #[error("Too many items: capacity of {capacity} reached")]
    CapacityExceeded {
        /// Configured capacity of the batch.
        capacity: usize,
    },

    /// Word-length code without a known element size.
    #[error("Unsupported word length code 0x{code:02X}")]
    UnsupportedWordLen {
        /// Raw word-length code.
        code: u8,
    },

    /// Area code that does not name a controller memory area.
    #[error("Unsupported area code 0x{code:02X}")]
    UnsupportedArea {
        /// Raw area code.
        code: u8,
    },

    /// Invalid parameter provided.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// Caller buffer cannot hold the bytes the item transfers.
    #[error("Buffer too small: {required} bytes required, {available} available")]
    BufferTooSmall {
        /// Bytes the item needs starting at the element offset.
        required: usize,
        /// Bytes left in the buffer after the element offset.
        available: usize,
    },

    /// A transaction was started with no registered items.
    #[error("Function refused: no items registered")]
    FunctionRefused,

    /// The transport reported an overall failure.
    #[error("Transport error 0x{code:08X}: {}", code_text(.code))]
    Transport {
        /// Client status code reported by the transport.
        code: i32,
    },
}

impl S7Error {
    /// Creates a new `InvalidParameter` error.
    ///
    /// # Example
    ///
    /// ```
    /// use s7_multivar::S7Error;
    ///
    /// let err = S7Error::invalid_parameter("amount", "must be greater than 0");
    /// ```
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `Transport` error from a client status code.
    ///
    /// A code of 0 would read as success, so it is reported as
    /// [`codes::FUNCTION_REFUSED`].
    ///
    /// # Example
    ///
    /// ```
    /// use s7_multivar::{codes, S7Error};
    ///
    /// let err = S7Error::transport(codes::TCP_RECEIVE_TIMEOUT);
    /// assert_eq!(err.code(), codes::TCP_RECEIVE_TIMEOUT);
    /// ```
    pub fn transport(code: i32) -> Self {
        let code = if code == 0 { codes::FUNCTION_REFUSED } else { code };
        Self::Transport { code }
    }

    /// Returns the client status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            S7Error::CapacityExceeded { .. } => codes::TOO_MANY_ITEMS,
            S7Error::UnsupportedWordLen { .. } => codes::INVALID_WORD_LEN,
            S7Error::UnsupportedArea { .. } | S7Error::InvalidParameter { .. } => {
                codes::INVALID_PARAMS
            }
            S7Error::BufferTooSmall { .. } => codes::BUFFER_TOO_SMALL,
            S7Error::FunctionRefused => codes::FUNCTION_REFUSED,
            S7Error::Transport { code: 0 } => codes::FUNCTION_REFUSED,
            S7Error::Transport { code } => *code,
        }
    }
}

/// Returns the aggregate status code of a transaction outcome (`0` on success).
///
/// # Example
///
/// ```
/// use s7_multivar::{codes, status_code, S7Error};
///
/// assert_eq!(status_code(&Ok(())), 0);
/// assert_eq!(status_code(&Err(S7Error::FunctionRefused)), codes::FUNCTION_REFUSED);
/// ```
pub fn status_code(outcome: &Result<()>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

fn code_text(code: &i32) -> &'static str {
    error_text(*code)
}

/// Returns a human-readable description of a client status code.
///
/// # Example
///
/// ```
/// use s7_multivar::{codes, error_text};
///
/// assert_eq!(error_text(0), "OK");
/// assert_eq!(error_text(codes::ITEM_NOT_AVAILABLE), "CPU : Item not available");
/// ```
pub fn error_text(code: i32) -> &'static str {
    match code {
        0 => "OK",
        codes::TCP_SOCKET_CREATION => "SYS : Error creating the Socket",
        codes::TCP_CONNECTION_TIMEOUT => "TCP : Connection Timeout",
        codes::TCP_CONNECTION_FAILED => "TCP : Connection Error",
        codes::TCP_RECEIVE_TIMEOUT => "TCP : Data receive Timeout",
        codes::TCP_DATA_RECEIVE => "TCP : Error receiving Data",
        codes::TCP_SEND_TIMEOUT => "TCP : Data send Timeout",
        codes::TCP_DATA_SEND => "TCP : Error sending Data",
        codes::TCP_CONNECTION_RESET => "TCP : Connection reset by the Peer",
        codes::TCP_NOT_CONNECTED => "CLI : Client not connected",
        codes::TCP_UNREACHABLE_HOST => "TCP : Unreachable host",
        codes::ISO_CONNECT => "ISO : Connection Error",
        codes::ISO_INVALID_PDU => "ISO : Invalid PDU received",
        codes::ISO_INVALID_DATA_SIZE => "ISO : Invalid Buffer passed to Send/Receive",
        codes::NEGOTIATING_PDU => "CLI : Error in PDU negotiation",
        codes::INVALID_PARAMS => "CLI : invalid param(s) supplied",
        codes::JOB_PENDING => "CLI : Job pending",
        codes::TOO_MANY_ITEMS => "CLI : too may items (>20) in multi read/write",
        codes::INVALID_WORD_LEN => "CLI : invalid WordLength",
        codes::PARTIAL_DATA_WRITTEN => "CLI : Partial data written",
        codes::SIZE_OVER_PDU => "CPU : total data exceeds the PDU size",
        codes::INVALID_PLC_ANSWER => "CLI : invalid CPU answer",
        codes::ADDRESS_OUT_OF_RANGE => "CPU : Address out of range",
        codes::INVALID_TRANSPORT_SIZE => "CPU : Invalid Transport size",
        codes::WRITE_DATA_SIZE_MISMATCH => "CPU : Data size mismatch",
        codes::ITEM_NOT_AVAILABLE => "CPU : Item not available",
        codes::INVALID_VALUE => "CPU : Invalid value supplied",
        codes::FUNCTION_NOT_AVAILABLE => "CPU : Function not available",
        codes::NEED_PASSWORD => "CPU : Function not authorized for current protection level",
        codes::INVALID_PASSWORD => "CPU : Invalid password",
        codes::NO_PASSWORD_TO_SET_OR_CLEAR => "CPU : No password to set or clear",
        codes::JOB_TIMEOUT => "CLI : Job Timeout",
        codes::PARTIAL_DATA_READ => "CLI : Partial data read",
        codes::BUFFER_TOO_SMALL => "CLI : The buffer supplied is too small",
        codes::FUNCTION_REFUSED => "CLI : function refused by CPU (Unknown error)",
        _ => "CLI : Unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_exceeded_display() {
        let err = S7Error::CapacityExceeded { capacity: 20 };
        assert_eq!(err.to_string(), "Too many items: capacity of 20 reached");
        assert_eq!(err.code(), codes::TOO_MANY_ITEMS);
    }

    #[test]
    fn test_unsupported_word_len_display() {
        let err = S7Error::UnsupportedWordLen { code: 0x09 };
        assert_eq!(err.to_string(), "Unsupported word length code 0x09");
        assert_eq!(err.code(), codes::INVALID_WORD_LEN);
    }

    #[test]
    fn test_transport_display_includes_text() {
        let err = S7Error::transport(codes::TCP_RECEIVE_TIMEOUT);
        assert_eq!(
            err.to_string(),
            "Transport error 0x00000004: TCP : Data receive Timeout"
        );
    }

    #[test]
    fn test_transport_code_passes_through() {
        assert_eq!(S7Error::transport(0x1234_5678).code(), 0x1234_5678);
    }

    #[test]
    fn test_transport_zero_code_never_reads_as_success() {
        let err = S7Error::transport(0);
        assert_eq!(err.code(), codes::FUNCTION_REFUSED);
        assert_eq!(status_code(&Err(err)), codes::FUNCTION_REFUSED);

        let raw = S7Error::Transport { code: 0 };
        assert_eq!(status_code(&Err(raw)), codes::FUNCTION_REFUSED);
    }

    #[test]
    fn test_function_refused_code() {
        assert_eq!(S7Error::FunctionRefused.code(), 0x0230_0000);
    }

    #[test]
    fn test_buffer_too_small_code() {
        let err = S7Error::BufferTooSmall {
            required: 4,
            available: 2,
        };
        assert_eq!(err.code(), codes::BUFFER_TOO_SMALL);
        assert_eq!(
            err.to_string(),
            "Buffer too small: 4 bytes required, 2 available"
        );
    }

    #[test]
    fn test_status_code() {
        assert_eq!(status_code(&Ok(())), 0);
        assert_eq!(
            status_code(&Err(S7Error::transport(codes::ISO_CONNECT))),
            codes::ISO_CONNECT
        );
    }

    #[test]
    fn test_error_text_unknown() {
        assert_eq!(error_text(0x7FFF_0000), "CLI : Unknown error");
    }
}
