// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod catalog;
pub mod cms;
pub mod content;
pub mod excerpt;
pub mod logging;
pub mod search;
