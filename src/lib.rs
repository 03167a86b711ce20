//! Symtab - Scoped Symbol Table
//!
//! A stack of lexical scopes for interpreters and static analyzers, with
//! innermost-scope-wins resolution and typed errors for undefined names.
mod log;
mod region;
mod response;
mod store;
mod table;

pub use log::{Error, ErrorKind, Pointer, Visual};
pub use region::Region;
pub use response::{CompileRequest, CompileResponse, ERROR_FIELD};
pub use store::Store;
pub use table::{Frame, ScopeTable};
