// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server configuration and session lifecycle

mod config;
mod session;

pub use config::{ServerSettings, SessionOptions};
pub use session::Session;
