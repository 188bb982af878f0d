// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! vSphere REST message types.
//!
//! This module provides the JSON bodies exchanged with the certificate
//! management endpoints and the structured API error body.

pub mod api_error;
mod certificate;

pub use api_error::ApiError;
pub use certificate::{CertificateInfo, TlsCsr, TlsCsrSpec};

pub(crate) use certificate::RenewSpec;
