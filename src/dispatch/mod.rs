//! Dispatch layer: the contract between request shaping and HTTP transport.
//!
//! This module provides types and traits for:
//! - Shaped requests tagged with a rate-limit bucket ([`DispatchRequest`], [`BucketKey`])
//! - JSON and multipart bodies ([`RequestBody`], [`MultipartBody`], [`Attachment`])
//! - Responses and failures ([`HttpResponse`], [`DispatchError`], [`RequestError`])
//! - Abstracting the transport ([`Dispatcher`])
//! - Production transport implementation ([`ReqwestDispatcher`])

mod bucket;
mod client;
mod error;
mod request;


pub use bucket::BucketKey;
pub use client::ReqwestDispatcher;
pub use error::{DispatchError, RemoteErrorPayload, RequestError};
pub use request::{
    Attachment, DispatchRequest, Dispatcher, HttpResponse, MultipartBody, RequestBody,
};
