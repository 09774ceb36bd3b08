//! Prestige Domain - Core sheet types
//!
//! This crate defines the data model shared by the sheet parser, the request
//! extractor and the adapters around them. Everything here is pure Rust with
//! no I/O.

pub mod block;
pub mod codegen;
pub mod context;
pub mod request;
pub mod settings;
pub mod sheet;
pub mod value;

pub use block::{Block, BlockKind, LineRange};
pub use codegen::CurlOptions;
pub use context::{ExecutionContext, FileBucket, Notice, NoticeKind, StagedFile};
pub use request::{BODY_TYPE_MULTIPART, BODY_TYPE_RAW, Headers, RequestDetails};
pub use settings::{OutputFormat, Settings};
pub use sheet::DEFAULT_SHEET;
pub use value::{MultipartField, MultipartFile, MultipartForm, Object, Value};
