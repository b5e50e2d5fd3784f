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

//! Open-addressing hash map over primitive keys.
//!
//! Backs both the cell store (`u64` flat key to cell) and the two head maps
//! (`u32` id to `u32` id). Slots are kept in parallel arrays; each occupied
//! slot records its drift from the home slot so deletions can shift later
//! entries back without tombstones.

const LOAD_FACTOR: f64 = 0.75;
const MIN_TABLE_LEN: usize = 8;
const DRIFT_LIMIT: usize = u16::MAX as usize;

/// Headroom kept by [`OpenAddressingMap::compact`] on top of the live entries.
const COMPACT_HEADROOM: f64 = 1.11;

pub(crate) trait TableKey: Copy + Eq + Default {
    fn hash_key(self) -> u64;
}

impl TableKey for u64 {
    #[inline]
    fn hash_key(self) -> u64 {
        fmix64(self)
    }
}

impl TableKey for u32 {
    #[inline]
    fn hash_key(self) -> u64 {
        fmix64(self as u64)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct OpenAddressingMap<K, V> {
    load_threshold: usize,
    keys: Vec<K>,
    values: Vec<V>,
    states: Vec<u16>,
    num_active: usize,
}

impl<K: TableKey, V: Default> Default for OpenAddressingMap<K, V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K: TableKey, V: Default> OpenAddressingMap<K, V> {
    /// Creates a map that holds at least `capacity` entries before it grows.
    pub fn with_capacity(capacity: usize) -> Self {
        let len = table_len_for(capacity);
        Self {
            load_threshold: load_threshold(len),
            keys: vec![K::default(); len],
            values: empty_values(len),
            states: vec![0; len],
            num_active: 0,
        }
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.find(key).map(|slot| &self.values[slot])
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.find(key).map(|slot| &mut self.values[slot])
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.find(key) {
            return Some(std::mem::replace(&mut self.values[slot], value));
        }
        if self.num_active >= self.load_threshold {
            self.resize(self.keys.len() * 2);
        }
        self.put_new(key, value);
        None
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let slot = self.find(key)?;
        let value = std::mem::take(&mut self.values[slot]);
        self.hash_delete(slot);
        self.num_active -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.num_active
    }

    pub fn is_empty(&self) -> bool {
        self.num_active == 0
    }

    /// Number of entries the map holds before its next growth.
    pub fn capacity(&self) -> usize {
        self.load_threshold
    }

    pub fn table_len(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key).collect()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            index: 0,
            remaining: self.num_active,
        }
    }

    /// Shrinks the table to the smallest one that fits `len * 1.11` entries.
    ///
    /// Entries are rehashed into new slots; keys are left as they are.
    pub fn compact(&mut self) {
        let target = (self.num_active as f64 * COMPACT_HEADROOM).ceil() as usize;
        let new_len = table_len_for(target);
        if new_len < self.keys.len() {
            self.resize(new_len);
        }
    }

    fn resize(&mut self, new_len: usize) {
        debug_assert!(new_len.is_power_of_two());
        let old_keys = std::mem::replace(&mut self.keys, vec![K::default(); new_len]);
        let old_values = std::mem::replace(&mut self.values, empty_values(new_len));
        let old_states = std::mem::replace(&mut self.states, vec![0; new_len]);
        self.load_threshold = load_threshold(new_len);
        self.num_active = 0;
        for (i, value) in old_values.into_iter().enumerate() {
            if old_states[i] > 0 {
                self.put_new(old_keys[i], value);
            }
        }
    }

    fn find(&self, key: K) -> Option<usize> {
        let mask = self.keys.len() - 1;
        let mut slot = (key.hash_key() as usize) & mask;
        while self.states[slot] > 0 {
            if self.keys[slot] == key {
                return Some(slot);
            }
            slot = (slot + 1) & mask;
        }
        None
    }

    // Caller guarantees `key` is absent and a free slot exists.
    fn put_new(&mut self, key: K, value: V) {
        let mask = self.keys.len() - 1;
        let mut slot = (key.hash_key() as usize) & mask;
        let mut drift: usize = 1;
        while self.states[slot] != 0 {
            slot = (slot + 1) & mask;
            drift += 1;
            assert!(drift < DRIFT_LIMIT, "drift limit exceeded");
        }
        self.keys[slot] = key;
        self.values[slot] = value;
        self.states[slot] = drift as u16;
        self.num_active += 1;
    }

    fn hash_delete(&mut self, mut hole: usize) {
        self.states[hole] = 0;
        let mut drift: usize = 1;
        let mask = self.keys.len() - 1;
        let mut slot = (hole + drift) & mask;
        while self.states[slot] != 0 {
            if self.states[slot] as usize > drift {
                self.keys[hole] = self.keys[slot];
                self.values.swap(hole, slot);
                self.states[hole] = self.states[slot] - drift as u16;
                self.states[slot] = 0;
                drift = 0;
                hole = slot;
            }
            slot = (slot + 1) & mask;
            drift += 1;
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    map: &'a OpenAddressingMap<K, V>,
    index: usize,
    remaining: usize,
}

impl<'a, K: Copy, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let index = self.index;
            self.index += 1;
            if self.map.states[index] > 0 {
                self.remaining -= 1;
                return Some((self.map.keys[index], &self.map.values[index]));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Copy, V> ExactSizeIterator for Iter<'_, K, V> {}

fn empty_values<V: Default>(len: usize) -> Vec<V> {
    std::iter::repeat_with(V::default).take(len).collect()
}

fn table_len_for(capacity: usize) -> usize {
    let slots = (capacity as f64 / LOAD_FACTOR).ceil() as usize + 1;
    slots.next_power_of_two().max(MIN_TABLE_LEN)
}

fn load_threshold(table_len: usize) -> usize {
    (table_len as f64 * LOAD_FACTOR) as usize
}

/// MurmurHash3 64-bit finalizer.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^ (k >> 33)
}
