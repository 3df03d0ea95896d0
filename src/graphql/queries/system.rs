use super::prelude::*;

#[derive(Default)]
pub struct SystemQueries;

#[Object]
impl SystemQueries {
    /// Constant greeting, handy as a connectivity check
    async fn hello(&self) -> &'static str {
        "Hello world!"
    }
}
