// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::VecDeque;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::column::page::{Page, PageReader};
use crate::errors::Result;

/// A [`PageReader`] over an in-memory list of uncompressed pages, for driving
/// column readers in tests without serializing a file.
pub struct InMemoryPageReader {
    pages: VecDeque<Page>,
}

impl InMemoryPageReader {
    pub fn new(pages: impl IntoIterator<Item = Page>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
        }
    }
}

impl PageReader for InMemoryPageReader {
    fn get_next_page(&mut self) -> BoxFuture<'_, Result<Option<Page>>> {
        let page = self.pages.pop_front();
        async move { Ok(page) }.boxed()
    }
}
