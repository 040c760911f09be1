// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::BTreeMap;

pub type StateKey = u8;
pub type StateValue = u32;

/// Keys are drawn from [0, KEY_SPACE)
pub const KEY_SPACE: StateKey = 5;

/// Values are drawn from [0, VALUE_RANGE)
pub const VALUE_RANGE: StateValue = 100;

/// Ordered copy of the shared mapping, comparable across coordination strategies
pub type StateSnapshot = BTreeMap<StateKey, StateValue>;
