pub mod decode;
pub mod negotiate;
pub mod query;
pub mod scanner;
