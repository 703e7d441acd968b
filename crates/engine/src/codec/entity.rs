//! Records for the entities anchored inside a region. Offsets are local to
//! the region origin.
//!
//! ```text
//! sign:       [i32 x][i32 y][string text]
//! chest:      [i32 x][i32 y][i32 count] count x item
//! item frame: [i32 x][i32 y] item
//! item:       [i32 netId][i32 stack][u8 prefix]
//! ```

use std::io::{Read, Write};

use super::{read_count, read_i32, read_string, read_u8, truncated, write_count, write_i32, write_string, write_u8};
use crate::error::CodecError;
use crate::region::{ChestData, ItemFrameData, SignData};
use crate::world::entities::ItemStack;

fn encode_item<W: Write>(w: &mut W, item: &ItemStack) -> Result<(), CodecError> {
    write_i32(w, item.net_id)?;
    write_i32(w, item.stack)?;
    write_u8(w, item.prefix)?;
    Ok(())
}

fn decode_item<R: Read>(r: &mut R, what: &'static str) -> Result<ItemStack, CodecError> {
    let err = truncated(what);
    Ok(ItemStack {
        net_id: read_i32(r).map_err(&err)?,
        stack: read_i32(r).map_err(&err)?,
        prefix: read_u8(r).map_err(&err)?,
    })
}

pub fn encode_sign<W: Write>(w: &mut W, sign: &SignData) -> Result<(), CodecError> {
    write_i32(w, sign.x)?;
    write_i32(w, sign.y)?;
    write_string(w, &sign.text)?;
    Ok(())
}

pub fn decode_sign<R: Read>(r: &mut R) -> Result<SignData, CodecError> {
    const WHAT: &str = "sign record";
    let err = truncated(WHAT);
    Ok(SignData {
        x: read_i32(r).map_err(&err)?,
        y: read_i32(r).map_err(&err)?,
        text: read_string(r, WHAT)?,
    })
}

pub fn encode_chest<W: Write>(w: &mut W, chest: &ChestData) -> Result<(), CodecError> {
    write_i32(w, chest.x)?;
    write_i32(w, chest.y)?;
    write_count(w, chest.items.len(), "chest item")?;
    for item in &chest.items {
        encode_item(w, item)?;
    }
    Ok(())
}

pub fn decode_chest<R: Read>(r: &mut R) -> Result<ChestData, CodecError> {
    const WHAT: &str = "chest record";
    let err = truncated(WHAT);
    let x = read_i32(r).map_err(&err)?;
    let y = read_i32(r).map_err(&err)?;
    let count = read_count(r, WHAT)?;
    let mut items = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        items.push(decode_item(r, WHAT)?);
    }
    Ok(ChestData { x, y, items })
}

pub fn encode_item_frame<W: Write>(w: &mut W, frame: &ItemFrameData) -> Result<(), CodecError> {
    write_i32(w, frame.x)?;
    write_i32(w, frame.y)?;
    encode_item(w, &frame.item)
}

pub fn decode_item_frame<R: Read>(r: &mut R) -> Result<ItemFrameData, CodecError> {
    const WHAT: &str = "item frame record";
    let err = truncated(WHAT);
    Ok(ItemFrameData {
        x: read_i32(r).map_err(&err)?,
        y: read_i32(r).map_err(&err)?,
        item: decode_item(r, WHAT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chest_slot_order_survives() {
        let chest = ChestData {
            x: 3,
            y: 1,
            items: vec![
                ItemStack::new(0, 0, 0),
                ItemStack::new(2, 250, 0),
                ItemStack::new(-12, 1, 81),
            ],
        };
        let mut buf = Vec::new();
        encode_chest(&mut buf, &chest).unwrap();
        assert_eq!(buf.len(), 12 + 3 * 9);
        assert_eq!(decode_chest(&mut buf.as_slice()).unwrap(), chest);
    }

    #[test]
    fn sign_record_layout() {
        let sign = SignData {
            x: 1,
            y: 2,
            text: "Keep out".into(),
        };
        let mut buf = Vec::new();
        encode_sign(&mut buf, &sign).unwrap();
        assert_eq!(&buf[..8], &[1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(buf[8], 8);
        assert_eq!(decode_sign(&mut buf.as_slice()).unwrap(), sign);
    }

    #[test]
    fn item_frame_truncated_mid_item() {
        let frame = ItemFrameData {
            x: 0,
            y: 0,
            item: ItemStack::new(9, 1, 0),
        };
        let mut buf = Vec::new();
        encode_item_frame(&mut buf, &frame).unwrap();
        let err = decode_item_frame(&mut &buf[..14]).unwrap_err();
        assert!(err.is_truncation());
    }
}
