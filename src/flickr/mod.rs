// Flickr API module.
// Provides the client, endpoints and types for the public photo listings.

#![allow(dead_code, unused_imports)]

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::FlickrClient;
pub use endpoints::{PhotoRequest, PhotoSource, RequestKind};
pub use types::{ImageDescriptor, PhotoPage, parse_photo_page};
