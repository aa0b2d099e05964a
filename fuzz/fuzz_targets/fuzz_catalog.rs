// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;
use powercommit::domain::CommitType;
use powercommit::services::catalog::parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(types) = parse(data, "fuzz") {
        for ct in &types {
            let _ = ct.to_string();
            let _ = CommitType::find(&types, &ct.semver);
        }
    }
});
