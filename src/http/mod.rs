// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP helpers for Seedgate
//!
//! Header filtering, session cookie extraction and classification of API
//! responses. Nothing here performs I/O beyond reading a response body.

mod classify;
mod cookie;
mod headers;
mod response;

pub use classify::{classify, parse_json_response, ClassifiedResponse, FailureKind, BODY_SNIPPET_LEN};
pub use cookie::{extract_cookie_value, Cookie, SessionCookie};
pub use headers::{filter_headers, find_header, HeaderEntry};
pub use response::{ResponseBody, ResponseDescriptor};

/// Common HTTP header names
pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_TYPE: &str = "content-type";
pub const COOKIE: &str = "cookie";
pub const ORIGIN: &str = "origin";
pub const REFERER: &str = "referer";
pub const SET_COOKIE: &str = "set-cookie";
