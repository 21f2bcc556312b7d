//! # Observability & Tracing
//!
//! Every actor logs through `tracing` with structured fields:
//!
//! - **Actor lifecycle**: `Actor started` (with storage key and preloaded size), `Shutdown`
//! - **Operations**: `Create`, `Get`, `List`, `Update`, `Delete`, `Action`, `ReplaceAll`
//!   at debug level with full payloads, and their outcome (`Created`, `Action ok`, …)
//!   at info level with `entity_type`, `id` and collection `size`
//! - **Failures**: `warn` with the entity error or the storage error
//!
//! Domain clients add `#[instrument]` spans around the request they send. Each actor
//! runs in its own task, so the actor's lines carry no client span. Completing an
//! order at debug level reads:
//!
//! ```text
//! DEBUG complete_order{id=order_3}: Sending request
//! DEBUG release{table=table_2 order=order_3}: Sending request
//!  INFO Action ok entity_type="Table" id=table_2
//!  INFO Table released order=order_3 table=table_2 status=Disponible reason="completion"
//!  INFO Action ok entity_type="Order" id=order_3
//! ```
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info pancito tables          # compact
//! RUST_LOG=debug pancito stats today    # full payloads
//! RUST_LOG=resource_actor=debug,info    # framework only
//! ```

/// Installs the global subscriber: `RUST_LOG` filter, compact format, no module paths
/// (`entity_type` already says which actor is talking).
///
/// Call once, from the binary. Library code and tests never install a subscriber.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
