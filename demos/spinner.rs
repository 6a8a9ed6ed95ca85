//! Demo: spinner alongside a slow computation.
//!
//! Spawns the decorative spinner and the work stand-in into one task group;
//! the moment the work produces its value, the spinner is cancelled, erases
//! its frame, and the answer is printed.
//!
//! ## Run
//! ```bash
//! cargo run --example spinner --features logging
//! ```

use std::sync::Arc;

use nursery::{Config, LogWriter, Subscribe, Supervisor};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sup = Supervisor::new(Config::default(), subs);

    let answer = sup.run().await?;
    println!("Answer: {answer}");
    Ok(())
}
