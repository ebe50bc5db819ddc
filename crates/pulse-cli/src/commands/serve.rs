//! Web server command implementation

use std::sync::Arc;

use anyhow::Result;
use pulse_core::{Database, StaticProvider};

pub async fn cmd_serve(db: Database, host: &str, port: u16) -> Result<()> {
    pulse_server::serve(db, Arc::new(StaticProvider::new()), host, port).await
}
