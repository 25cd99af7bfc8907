use crate::io_utils;
use crate::{Error, Result};
use derive_more::Deref;
use std::io::{Read, Write};
use std::mem;

/// The byte length of a variable-length body.
#[derive(Deref, Clone, Copy, PartialEq, Eq, Debug)]
pub struct BodyLen(u32);
impl BodyLen {
    pub fn from_body(type_name: &str, body: &[u8]) -> Result<Self> {
        let int = u32::try_from(body.len()).map_err(|_| {
            Error::malformed(type_name, format!("body of {} bytes is too long", body.len()))
        })?;
        Ok(Self(int))
    }
    pub fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.0.to_le_bytes())?;
        Ok(())
    }
    pub fn deser<R: Read + ?Sized>(r: &mut R, type_name: &str) -> Result<Self> {
        let mut buf = [0u8; mem::size_of::<u32>()];
        io_utils::read_exact(r, &mut buf, type_name)?;
        Ok(Self(u32::from_le_bytes(buf)))
    }
}

/// The number of members in a composite value.
#[derive(Deref, Clone, Copy, PartialEq, Eq, Debug)]
pub struct MembersCount(u32);
impl MembersCount {
    pub fn from_members<T>(type_name: &str, members: &[T]) -> Result<Self> {
        let membs_ct = u32::try_from(members.len()).map_err(|_| {
            Error::malformed(type_name, format!("{} members is too many", members.len()))
        })?;
        Ok(Self(membs_ct))
    }
    pub fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.0.to_le_bytes())?;
        Ok(())
    }
    pub fn deser<R: Read + ?Sized>(r: &mut R, type_name: &str) -> Result<Self> {
        let mut buf = [0u8; mem::size_of::<u32>()];
        io_utils::read_exact(r, &mut buf, type_name)?;
        Ok(Self(u32::from_le_bytes(buf)))
    }
}
