use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        $crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure is fatal to the current parse: errors propagate to the top-level caller, which
/// reports them and aborts. Non-fatal conditions (an unknown target platform byte, an unexpected
/// format version) are emitted as warnings through the `log` facade instead.
///
/// # Error Categories
///
/// ## Stream Errors
/// - [`Error::Io`] - Underlying read or open failure
/// - [`Error::OutOfBounds`] - Attempted to read or seek beyond the end of the data
/// - [`Error::BadUtf8`] - Malformed UTF-8 character data in a string payload
/// - [`Error::Malformed`] - Corrupted data that fits no more specific category
///
/// ## Frame Errors
/// - [`Error::NotXnb`] - Magic byte mismatch
/// - [`Error::Truncated`] - Declared frame size exceeds the actual file size
/// - [`Error::CompressedUnsupported`] - The compressed-payload flag is set
/// - [`Error::SizeMismatch`] - Final stream position differs from the declared frame end
///
/// ## Reader Resolution Errors
/// - [`Error::UnknownReader`] - Manifest names a reader not in the registry
/// - [`Error::UnknownTargetType`] - A generic reader's argument type has no reader
/// - [`Error::BadTypeId`] - An object tag is out of range or selects an unexpected type
/// - [`Error::ReflectiveUnsupported`] - The manifest relies on reflective deserialization
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or mapping the
    /// input file, or while writing dump output.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// An out of bound access was attempted while parsing the file.
    ///
    /// This error occurs when trying to read data beyond the end of the stream.
    /// It's a safety check to prevent buffer overruns during parsing.
    #[error("Out of bound read would have occurred!")]
    OutOfBounds,

    /// The magic bytes at the start of the file are not `XNB`.
    #[error("Not an XNB file")]
    NotXnb,

    /// The size declared in the header extends past the end of the file.
    #[error("XNB file has been truncated: header declares {declared} bytes but the file holds {actual}")]
    Truncated {
        /// Frame size declared by the header, in bytes
        declared: usize,
        /// Actual number of bytes available
        actual: usize,
    },

    /// The compressed-payload flag is set in the header.
    ///
    /// Decompressing XNB payloads is out of scope; the parser reports the
    /// compressed and decompressed sizes before failing.
    #[error("Compressed XNB files are not supported")]
    CompressedUnsupported,

    /// The type manifest names a reader that is neither registered nor
    /// constructible as a generic specialization.
    #[error("Can't find type reader '{0}'")]
    UnknownReader(String),

    /// A generic reader's element, key, or value type has no reader with a
    /// matching target type in the registry.
    #[error("Can't find reader for target type '{0}'")]
    UnknownTargetType(String),

    /// An object tag selected a reader slot that does not exist, or a
    /// pre-tagged field carried a different type than its schema requires.
    #[error("Invalid type id: {0}")]
    BadTypeId(String),

    /// After the final shared resource the stream position did not equal the
    /// frame end declared by the header.
    #[error("End position {actual} does not match the {expected} declared by the XNB header")]
    SizeMismatch {
        /// Frame end declared by the header
        expected: usize,
        /// Stream position after the last object
        actual: usize,
    },

    /// A reflective reader was asked to decode a value.
    ///
    /// Reflective deserialization requires runtime type metadata from the
    /// source ecosystem and cannot be implemented here.
    #[error("Reflective type readers are not supported")]
    ReflectiveUnsupported,

    /// Malformed UTF-8 character data in a string payload.
    #[error("Malformed UTF-8 character data")]
    BadUtf8,

    /// The data is damaged in a way no more specific error describes.
    ///
    /// The error includes the source location where the malformation was
    /// detected for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
