// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

pub mod catalog;
pub mod form;
pub mod formatter;
pub mod git;
pub mod preference;
pub mod settings;
