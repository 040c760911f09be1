// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{StateKey, StateValue, KEY_SPACE, VALUE_RANGE};

pub trait Random: Send + Sync {
    fn u8(&self, range: std::ops::Range<u8>) -> u8;
    fn u32(&self, range: std::ops::Range<u32>) -> u32;

    fn key(&self) -> StateKey {
        self.u8(0..KEY_SPACE)
    }

    fn value(&self) -> StateValue {
        self.u32(0..VALUE_RANGE)
    }
}
