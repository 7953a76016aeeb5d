// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client-side business logic.

pub mod analytics;
pub mod api;
pub mod seo;
pub mod session;
pub mod toast;
pub mod weights;

pub use api::{ApiClient, ApiRequest, ApiResponse};
pub use seo::{use_seo, PageHead, PageMeta, SeoBinding};
pub use session::SessionStore;
pub use toast::ToastStore;
pub use weights::{weight_categories, weight_categories_in_year, ALL_WEIGHTS};
