//! Resolution of type names into shared descriptors.
//!
//! Simple names map to one descriptor each, created with the registry.
//! Parametric names are parsed recursively, and are built around the shared
//! descriptors of their arguments:
//!
//! ```text
//! FixedString(N)
//! Array(T)
//! Tuple(T1, T2, ...)
//! Nullable(T)
//! ```
//!
//! A resolved descriptor's [`name`](crate::DataType::name) is the canonical
//! spelling, which resolves to an equivalent descriptor again.

use crate::types::*;
use crate::DataTypePtr;
use griddle_types::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};


/// The process-wide registry of the reference catalog.
pub fn registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TypeRegistry::new)
}

pub struct TypeRegistry {
    simple: BTreeMap<String, DataTypePtr>,
    parametric: Regex,
}

impl TypeRegistry {
    /// A registry holding the reference catalog.
    pub fn new() -> Self {
        let mut reg = Self {
            simple: BTreeMap::new(),
            parametric: Regex::new(r"(?s)^\s*(\w+)\s*\((.*)\)\s*$").unwrap(),
        };
        reg.register(Arc::new(DataTypeUInt8::new()));
        reg.register(Arc::new(DataTypeUInt16::new()));
        reg.register(Arc::new(DataTypeUInt32::new()));
        reg.register(Arc::new(DataTypeUInt64::new()));
        reg.register(Arc::new(DataTypeInt8::new()));
        reg.register(Arc::new(DataTypeInt16::new()));
        reg.register(Arc::new(DataTypeInt32::new()));
        reg.register(Arc::new(DataTypeInt64::new()));
        reg.register(Arc::new(DataTypeFloat32::new()));
        reg.register(Arc::new(DataTypeFloat64::new()));
        reg.register(Arc::new(DataTypeString));
        reg
    }

    /// Adds a non-parametric descriptor under its own name, replacing any previous one.
    pub fn register(&mut self, data_type: DataTypePtr) {
        self.simple.insert(data_type.name(), data_type);
    }

    /// The registered non-parametric names, in sorted order.
    pub fn simple_names(&self) -> impl Iterator<Item = &str> {
        self.simple.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Result<DataTypePtr> {
        if let Some(ty) = self.simple.get(name.trim()) {
            return Ok(Arc::clone(ty));
        }

        let caps = self
            .parametric
            .captures(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;
        let (outer, args) = (&caps[1], &caps[2]);
        let args = split_args(args).ok_or_else(|| Error::UnknownType(name.to_string()))?;

        let ty: DataTypePtr = match (outer, args.as_slice()) {
            ("FixedString", [n]) => {
                let n = n
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=MAX_FIXED_STRING_WIDTH).contains(n))
                    .ok_or_else(|| Error::UnknownType(name.to_string()))?;
                Arc::new(DataTypeFixedString::new(n))
            }
            ("Array", [nested]) => Arc::new(DataTypeArray::new(self.get(nested)?)),
            ("Nullable", [nested]) => {
                let nested = self.get(nested)?;
                if nested.name().starts_with("Nullable(") {
                    return Err(Error::UnknownType(name.to_string()));
                }
                Arc::new(DataTypeNullable::new(nested))
            }
            ("Tuple", members) if !members.is_empty() => {
                let members = members
                    .iter()
                    .map(|memb| self.get(memb))
                    .collect::<Result<Vec<_>>>()?;
                Arc::new(DataTypeTuple::new(members))
            }
            _ => return Err(Error::UnknownType(name.to_string())),
        };
        log::debug!("Resolved data type {:?} as {}", name, ty.name());
        Ok(ty)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits on commas outside parentheses.
/// `None` if parentheses are unbalanced or an argument is blank.
fn split_args(args: &str) -> Option<Vec<&str>> {
    if args.trim().is_empty() {
        return Some(vec![]);
    }
    let mut out = vec![];
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                out.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    out.push(&args[start..]);
    if out.iter().any(|arg| arg.trim().is_empty()) {
        return None;
    }
    Some(out)
}
