//! Root crate facade for the Sharebin paste store server.

pub use sharebin_server::{
    config, create_app, db, error, handlers, models, resolve_bind_address, serve_router, AppError,
    AppState, Config, Database,
};
