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

//! Canonical request parameters.
//!
//! A parameter structure lists its fields explicitly through [`ToParams`],
//! every field value is stringified through [`ParamValue`], and the result is
//! collected into a [`ParameterSet`] whose keys are kept in lexicographic
//! byte order.
//!
//! A field contributes an entry only when its value is present and
//! stringifies to a non-empty string:
//!
//! - `None` is never sent.
//! - Integers are sent in decimal, so `0` is sent as `"0"`.
//! - Floats are sent in fixed point with 4 fractional digits.
//! - Booleans are sent as `"true"` / `"false"`.
//! - Empty strings are dropped.

use std::collections::btree_map;
use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;

use crate::{Error, Result};

/// ParamValue converts a field value into its wire representation.
///
/// Returns `None` if the value is absent.
pub trait ParamValue {
    /// Stringify this value.
    fn to_param_value(&self) -> Option<String>;
}

macro_rules! impl_param_value_for_integer {
    ($($t:ty),*) => {
        $(
            impl ParamValue for $t {
                fn to_param_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_param_value_for_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl ParamValue for f32 {
    fn to_param_value(&self) -> Option<String> {
        Some(format!("{:.4}", self))
    }
}

impl ParamValue for f64 {
    fn to_param_value(&self) -> Option<String> {
        Some(format!("{:.4}", self))
    }
}

impl ParamValue for bool {
    fn to_param_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for str {
    fn to_param_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for String {
    fn to_param_value(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn to_param_value(&self) -> Option<String> {
        self.as_ref().and_then(ParamValue::to_param_value)
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param_value(&self) -> Option<String> {
        (**self).to_param_value()
    }
}

/// ToParams lists the fields of a parameter structure.
///
/// Implementations call [`ParameterSet::insert`] once per field, using the
/// wire name of that field.
///
/// ```
/// use ucloud_core::{ParameterSet, ToParams};
///
/// struct DescribeZone {
///     region: String,
///     limit: Option<u32>,
/// }
///
/// impl ToParams for DescribeZone {
///     fn to_params(&self, params: &mut ParameterSet) {
///         params.insert("Region", &self.region);
///         params.insert("Limit", self.limit);
///     }
/// }
///
/// let params = ParameterSet::from_params(&DescribeZone {
///     region: "cn-bj2".to_string(),
///     limit: None,
/// });
/// assert_eq!(params.get("Region"), Some("cn-bj2"));
/// assert_eq!(params.get("Limit"), None);
/// ```
pub trait ToParams {
    /// Write all present fields into `params`.
    fn to_params(&self, params: &mut ParameterSet);
}

impl<T: ToParams + ?Sized> ToParams for &T {
    fn to_params(&self, params: &mut ParameterSet) {
        (**self).to_params(params)
    }
}

impl ToParams for ParameterSet {
    fn to_params(&self, params: &mut ParameterSet) {
        for (k, v) in self.iter() {
            params.insert(k, v);
        }
    }
}

/// ParameterSet is an ordered mapping from parameter name to value.
///
/// Names are unique: writing the same name twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a single parameter structure.
    pub fn from_params(params: &impl ToParams) -> Self {
        let mut set = Self::new();
        params.to_params(&mut set);
        set
    }

    /// Flatten the common block first, then the operation block.
    ///
    /// Operation fields overwrite common fields with the same name.
    pub fn merged(common: &impl ToParams, operation: &impl ToParams) -> Self {
        let mut set = Self::new();
        common.to_params(&mut set);
        operation.to_params(&mut set);
        set
    }

    /// Insert a value under `name`.
    ///
    /// Absent values and values that stringify to an empty string are
    /// skipped. Returns whether the entry was written.
    pub fn insert(&mut self, name: impl Into<String>, value: impl ParamValue) -> bool {
        match value.to_param_value() {
            Some(v) if !v.is_empty() => {
                self.values.insert(name.into(), v);
                true
            }
            _ => false,
        }
    }

    /// Apply all fields of `params` on top of the current entries.
    pub fn extend(&mut self, params: &impl ToParams) -> &mut Self {
        params.to_params(self);
        self
    }

    /// Get the value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Check if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no entry is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `application/x-www-form-urlencoded` in key order.
    ///
    /// ```shell
    /// [(Region, cn-bj2), (Name, a b)] => "Name=a+b&Region=cn-bj2"
    /// ```
    pub fn encode(&self) -> String {
        let mut s = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.iter() {
            s.append_pair(k, v);
        }
        s.finish()
    }

    /// Parse an encoded query string back into a parameter set.
    pub fn decode(query: &str) -> Self {
        let mut set = Self::new();
        for (k, v) in form_urlencoded::parse(query.as_bytes()) {
            set.insert(k, &*v);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Percent decode a query string, turning `+` back into space.
pub fn query_unescape(query: &str) -> Result<String> {
    let replaced = query.replace('+', " ");
    percent_decode_str(&replaced)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|e| Error::request_invalid("unescape query failed").with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(-42i64, "-42"; "negative i64")]
    #[test_case(0i32, "0"; "zero i32")]
    #[test_case(7i8, "7"; "i8")]
    #[test_case(255u8, "255"; "u8")]
    #[test_case(u64::MAX, "18446744073709551615"; "u64 max")]
    #[test_case(1.5f32, "1.5000"; "f32")]
    #[test_case(0.0f32, "0.0000"; "zero f32")]
    #[test_case(2.123456f64, "2.1235"; "f64 rounds")]
    #[test_case(-3.0f64, "-3.0000"; "negative f64")]
    #[test_case(true, "true"; "bool true")]
    #[test_case(false, "false"; "bool false")]
    #[test_case("cn-bj2", "cn-bj2"; "str")]
    fn test_to_param_value(value: impl ParamValue, expected: &str) {
        assert_eq!(value.to_param_value().as_deref(), Some(expected));
    }

    #[test]
    fn test_option_param_value() {
        assert_eq!(None::<u32>.to_param_value(), None);
        assert_eq!(Some(0u32).to_param_value().as_deref(), Some("0"));
        assert_eq!(Some(false).to_param_value().as_deref(), Some("false"));
        assert_eq!(
            Some("x".to_string()).as_ref().to_param_value().as_deref(),
            Some("x")
        );
    }

    #[allow(non_snake_case)]
    struct ZoneParams {
        Region: String,
        CPU: i64,
        Quantity: i64,
        Memory: Option<i64>,
        Tag: String,
    }

    impl ToParams for ZoneParams {
        fn to_params(&self, params: &mut ParameterSet) {
            params.insert("Zone", &self.Region);
            params.insert(stringify!(CPU), self.CPU);
            params.insert(stringify!(Quantity), self.Quantity);
            params.insert(stringify!(Memory), self.Memory);
            params.insert(stringify!(Tag), &self.Tag);
        }
    }

    #[test]
    fn test_presence_gate() {
        let params = ParameterSet::from_params(&ZoneParams {
            Region: "cn-bj2".to_string(),
            CPU: 0,
            Quantity: 1,
            Memory: None,
            Tag: String::new(),
        });

        assert_eq!(params.get("Zone"), Some("cn-bj2"));
        assert_eq!(params.get("Quantity"), Some("1"));
        // Zero stringifies to "0" which is not empty, so it is sent.
        assert_eq!(params.get("CPU"), Some("0"));
        // Unset optional and empty string are never sent.
        assert!(!params.contains("Memory"));
        assert!(!params.contains("Tag"));
        assert!(!params.contains("Region"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_presence_gate_optional_zero() {
        let mut params = ParameterSet::new();
        assert!(params.insert("CPU", Some(0i64)));
        assert!(!params.insert("Memory", None::<i64>));
        assert!(!params.insert("Name", ""));

        assert_eq!(params.encode(), "CPU=0");
    }

    #[test]
    fn test_merged_operation_overwrites_common() {
        let mut common = ParameterSet::new();
        common.insert("PublicKey", "pub");
        common.insert("Region", "cn-bj1");

        let mut operation = ParameterSet::new();
        operation.insert("Region", "cn-bj2");
        operation.insert("Limit", 10u32);

        let params = ParameterSet::merged(&common, &operation);
        assert_eq!(params.get("Region"), Some("cn-bj2"));
        assert_eq!(params.get("PublicKey"), Some("pub"));
        assert_eq!(params.get("Limit"), Some("10"));
    }

    #[test]
    fn test_encode_sorted() {
        let mut params = ParameterSet::new();
        params.insert("Region", "cn-bj2");
        params.insert("Name", "a b&c=d");
        params.insert("CPU", 2);
        params.insert("ChargeType", "Month");

        assert_eq!(
            params.encode(),
            "CPU=2&ChargeType=Month&Name=a+b%26c%3Dd&Region=cn-bj2"
        );
    }

    #[test]
    fn test_decode_encoded_is_idempotent() {
        let mut params = ParameterSet::new();
        params.insert("Password", "p@ss+w/rd=");
        params.insert("Name", "主机 01");
        params.insert("Limit", 20);

        let decoded = ParameterSet::decode(&params.encode());
        assert_eq!(decoded, params);
        assert_eq!(decoded.encode(), params.encode());
    }

    #[test]
    fn test_query_unescape() {
        assert_eq!(
            query_unescape("Name=a+b%26c%3Dd%2B").unwrap(),
            "Name=a b&c=d+"
        );
        assert!(query_unescape("%ff").is_err());
    }
}
