// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Unit tests for texture upload validation

use crate::frontend::renderer::texture_backend::{check_upload, UploadRejection};

#[test]
fn test_valid_upload() {
    assert_eq!(check_upload(2, 3, &[0; 24], 8192), Ok(()));
}

#[test]
fn test_empty_upload() {
    assert_eq!(check_upload(0, 3, &[], 8192), Err(UploadRejection::Empty));
    assert_eq!(check_upload(3, 0, &[], 8192), Err(UploadRejection::Empty));
}

#[test]
fn test_oversized_upload() {
    assert_eq!(
        check_upload(4096, 1, &[0; 4096 * 4], 2048),
        Err(UploadRejection::TooLarge { max: 2048 })
    );
}

#[test]
fn test_size_mismatch() {
    assert_eq!(
        check_upload(2, 2, &[0; 15], 8192),
        Err(UploadRejection::SizeMismatch {
            expected: 16,
            actual: 15
        })
    );
}
