use super::composite;
use crate::columns::{ColumnPtr, ColumnTuple};
use crate::{DataType, DataTypePtr, DataTypes};
use griddle_types::serde::Datum;
use griddle_types::{Error, Result};
use itertools::Itertools;
use std::io::{BufRead, Write};
use std::sync::Arc;


/// A fixed sequence of members, each of its own type.
///
/// Binary layout: the members in order, with no header.
/// Text: `(m1,m2,...)`, with members in their quoted form.
#[derive(Debug)]
pub struct DataTypeTuple {
    members: DataTypes,
}

impl DataTypeTuple {
    /// # Panics
    ///
    /// If `members` is empty.
    pub fn new(members: DataTypes) -> Self {
        assert!(!members.is_empty(), "a Tuple must have at least one member");
        Self { members }
    }

    pub fn members(&self) -> &[DataTypePtr] {
        &self.members
    }

    fn member_data<'a>(&self, dat: &'a Datum) -> Result<&'a [Datum]> {
        match dat {
            Datum::Tuple(membs) if membs.len() == self.members.len() => Ok(membs),
            _ => Err(Error::type_mismatch(self.name(), dat.kind())),
        }
    }

    fn write_body(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        composite::write_delimited(w, b'(', b')', self.member_data(dat)?, |i, memb, w| {
            self.members[i].serialize_text_quoted(memb, w, false)
        })
    }

    fn read_body(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let name = self.name();
        let membs = composite::read_delimited(r, b'(', b')', &name, |i, r| {
            match self.members.get(i) {
                Some(ty) => ty.deserialize_text_quoted(r, false),
                None => Err(Error::malformed(&name, "too many members")),
            }
        })?;
        if membs.len() != self.members.len() {
            return Err(Error::malformed(
                name,
                format!("{} of {} members", membs.len(), self.members.len()),
            ));
        }
        Ok(Datum::Tuple(membs))
    }
}

impl DataType for DataTypeTuple {
    fn name(&self) -> String {
        format!("Tuple({})", self.members.iter().map(|ty| ty.name()).join(", "))
    }

    fn clone_type(&self) -> DataTypePtr {
        Arc::new(Self::new(
            self.members.iter().map(|ty| ty.clone_type()).collect(),
        ))
    }

    fn canonicalize(&self, dat: &Datum) -> Result<Datum> {
        let membs = self
            .member_data(dat)?
            .iter()
            .zip(self.members.iter())
            .map(|(memb, ty)| ty.canonicalize(memb))
            .collect::<Result<Vec<_>>>()?;
        Ok(Datum::Tuple(membs))
    }

    fn serialize_binary(&self, dat: &Datum, w: &mut dyn Write) -> Result<()> {
        for (memb, ty) in self.member_data(dat)?.iter().zip(self.members.iter()) {
            ty.serialize_binary(memb, w)?;
        }
        Ok(())
    }

    fn deserialize_binary(&self, r: &mut dyn BufRead) -> Result<Datum> {
        let membs = self
            .members
            .iter()
            .map(|ty| ty.deserialize_binary(r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Datum::Tuple(membs))
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
        Box::new(ColumnTuple::new(
            self.members.iter().map(|ty| ty.create_column()).collect(),
        ))
    }

    fn default_value(&self) -> Datum {
        Datum::Tuple(self.members.iter().map(|ty| ty.default_value()).collect())
    }

    /// The sum of the members' sizes. Fails if any member has no fixed size.
    fn size_of_field(&self) -> Result<usize> {
        self.members.iter().map(|ty| ty.size_of_field()).sum()
    }
}
