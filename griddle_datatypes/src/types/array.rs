use super::composite;
use crate::columns::{ColumnArray, ColumnPtr};
use crate::{DataType, DataTypePtr};
use griddle_types::serde::{Datum, MembersCount};
use griddle_types::{Error, Result};
use std::cmp;
use std::io::{BufRead, Write};
use std::sync::Arc;


/// Caps the up-front allocation, since the count comes from untrusted input.
const MAX_RESERVE_MEMBERS: usize = 1 << 12;

/// Variable-length sequences of one nested type.
///
/// Binary layout: a [`MembersCount`], then each element in the nested layout.
/// Text: `[e1,e2,...]`, with elements in their quoted form.
#[derive(Debug)]
pub struct DataTypeArray {
    nested: DataTypePtr,
}

impl DataTypeArray {
    pub fn new(nested: DataTypePtr) -> Self {
        Self { nested }
    }

    pub fn nested(&self) -> &DataTypePtr {
        &self.nested
    }

    fn members<'a>(&self, dat: &'a Datum) -> Result<&'a [Datum]> {
        match dat {
            Datum::Array(members) => Ok(members),
            _ => Err(Error::type_mismatch(self.name(), dat.kind())),
        }
    }

    fn write_body(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        composite::write_delimited(w, b'[', b']', self.members(dat)?, |_, member, w| {
            self.nested.serialize_text_quoted(member, w, false)
        })
    }

    fn read_body(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let members = composite::read_delimited(r, b'[', b']', &self.name(), |_, r| {
            self.nested.deserialize_text_quoted(r, false)
        })?;
        Ok(Datum::Array(members))
    }
}

impl DataType for DataTypeArray {
    fn name(&self) -> String {
        format!("Array({})", self.nested.name())
    }

    fn clone_type(&self) -> DataTypePtr {
        Arc::new(Self::new(self.nested.clone_type()))
    }

    fn canonicalize(&self, dat: &Datum) -> Result<Datum> {
        let members = self
            .members(dat)?
            .iter()
            .map(|member| self.nested.canonicalize(member))
            .collect::<Result<Vec<_>>>()?;
        Ok(Datum::Array(members))
    }

    fn serialize_binary(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        let members = self.members(dat)?;
        MembersCount::from_members(&self.name(), members)?.ser(w)?;
        for member in members {
            self.nested.serialize_binary(member, w)?;
        }
        Ok(())
    }

    fn deserialize_binary(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let membs_ct = *MembersCount::deser(r, &self.name())? as usize;
        let mut members = Vec::with_capacity(cmp::min(membs_ct, MAX_RESERVE_MEMBERS));
        for _ in 0..membs_ct {
            members.push(self.nested.deserialize_binary(r)?);
        }
        Ok(Datum::Array(members))
    }

    fn serialize_text(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        self.write_body(dat, w)
    }
    fn deserialize_text(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.read_body(r)
    }

    fn serialize_text_escaped(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        self.write_body(dat, w)
    }
    fn deserialize_text_escaped(&self, r: &mut dyn BufRead) -> Result<Datum> {
        self.read_body(r)
    }

    fn serialize_text_quoted(&self, dat: &Datum, w: &mut dyn Write, compatible: bool) -> Result<()> {
        composite::serialize_quoted_composite(w, compatible, |w| self.write_body(dat, w))
    }
    fn deserialize_text_quoted(&self, r: &mut dyn BufRead, compatible: bool) -> Result<Datum> {
        composite::deserialize_quoted_composite(r, compatible, &self.name(), |r| self.read_body(r))
    }

    fn create_column(&self) -> ColumnPtr {
        Box::new(ColumnArray::new(self.nested.create_column()))
    }

    fn default_value(&self) -> Datum {
        Datum::Array(vec![])
    }
}
