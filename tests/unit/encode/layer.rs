use std::io::Cursor;

use super::*;

fn raster(name: &str, width: u32, height: u32, pixels: Vec<u8>) -> RasterImage {
    RasterImage::from_rgba8(name, width, height, pixels).unwrap()
}

#[test]
fn extract_plane_picks_every_fourth_byte() {
    let rgba = vec![10, 20, 30, 40, 11, 21, 31, 41];
    assert_eq!(extract_plane(&rgba, 0), vec![10, 11]);
    assert_eq!(extract_plane(&rgba, 1), vec![20, 21]);
    assert_eq!(extract_plane(&rgba, 2), vec![30, 31]);
    assert_eq!(extract_plane(&rgba, 3), vec![40, 41]);
}

#[test]
fn pascal_name_passes_short_names_through() {
    let (bytes, truncated) = pascal_name("Layer_0");
    assert_eq!(bytes, b"Layer_0");
    assert!(!truncated);

    let exact = "x".repeat(MAX_NAME_BYTES);
    let (bytes, truncated) = pascal_name(&exact);
    assert_eq!(bytes.len(), MAX_NAME_BYTES);
    assert!(!truncated);
}

#[test]
fn pascal_name_truncates_to_255_bytes() {
    let long = "x".repeat(300);
    let (bytes, truncated) = pascal_name(&long);
    assert_eq!(bytes.len(), MAX_NAME_BYTES);
    assert_eq!(bytes, long.as_bytes()[..MAX_NAME_BYTES].to_vec());
    assert!(truncated);
}

#[test]
fn pascal_name_cuts_on_char_boundaries() {
    // 150 two-byte chars = 300 bytes; byte 255 falls mid-char.
    let long = "é".repeat(150);
    let (bytes, truncated) = pascal_name(&long);
    assert_eq!(bytes.len(), 254);
    assert!(truncated);
    assert!(String::from_utf8(bytes).is_ok());
}

#[test]
fn channel_length_is_tag_plus_plane() {
    let record = LayerRecord::build(&raster("r", 3, 2, vec![0u8; 24])).unwrap();
    assert_eq!(record.channel_len, 2 + 6);
}

#[test]
fn layer_info_block_layout_for_single_layer() {
    // One 2x1 layer named "L" with distinct per-channel bytes.
    let record = LayerRecord::build(&raster(
        "L",
        2,
        1,
        vec![10, 20, 30, 40, 11, 21, 31, 41],
    ))
    .unwrap();

    let mut cur = Cursor::new(Vec::new());
    {
        let mut sink = DocumentSink::new(&mut cur);
        write_layer_info(&mut sink, std::slice::from_ref(&record)).unwrap();
    }
    let b = cur.into_inner();

    let info_len = u32::from_be_bytes(b[0..4].try_into().unwrap());
    assert_eq!(info_len as usize, b.len() - 4);
    assert_eq!(info_len % 2, 0);
    assert_eq!(i16::from_be_bytes(b[4..6].try_into().unwrap()), 1);

    // Bounding box: top, left, bottom, right.
    assert_eq!(i32::from_be_bytes(b[6..10].try_into().unwrap()), 0);
    assert_eq!(i32::from_be_bytes(b[10..14].try_into().unwrap()), 0);
    assert_eq!(i32::from_be_bytes(b[14..18].try_into().unwrap()), 1);
    assert_eq!(i32::from_be_bytes(b[18..22].try_into().unwrap()), 2);

    // Channel directory: alpha first, each 2 (tag) + 2 (plane) bytes long.
    assert_eq!(u16::from_be_bytes(b[22..24].try_into().unwrap()), 4);
    let expected_ids = [-1i16, 0, 1, 2];
    for (i, id) in expected_ids.into_iter().enumerate() {
        let at = 24 + i * 6;
        assert_eq!(i16::from_be_bytes(b[at..at + 2].try_into().unwrap()), id);
        assert_eq!(
            u32::from_be_bytes(b[at + 2..at + 6].try_into().unwrap()),
            4
        );
    }

    assert_eq!(&b[48..52], b"8BIM");
    assert_eq!(&b[52..56], b"norm");
    assert_eq!(b[56], 255); // opacity
    assert_eq!(b[57], 0); // clipping
    assert_eq!(b[58], 0x08); // flags
    assert_eq!(b[59], 0); // filler

    // Extra block: two empty lengths, then "L" padded so 1 + 1 rounds to 4.
    let extra_len = u32::from_be_bytes(b[60..64].try_into().unwrap());
    assert_eq!(extra_len, 12);
    assert_eq!(&b[64..72], &[0u8; 8]);
    assert_eq!(b[72], 1);
    assert_eq!(b[73], b'L');
    assert_eq!(&b[74..76], &[0u8; 2]);

    // Channel payloads, alpha, red, green, blue, each tagged raw.
    assert_eq!(&b[76..92], &[
        0, 0, 40, 41, //
        0, 0, 10, 11, //
        0, 0, 20, 21, //
        0, 0, 30, 31,
    ]);
    assert_eq!(b.len(), 92);
}

#[test]
fn extra_block_length_is_always_a_multiple_of_four() {
    for name_len in 0..8usize {
        let name = "n".repeat(name_len);
        let record = LayerRecord::build(&raster(&name, 1, 1, vec![0u8; 4])).unwrap();
        let mut cur = Cursor::new(Vec::new());
        {
            let mut sink = DocumentSink::new(&mut cur);
            write_layer_info(&mut sink, std::slice::from_ref(&record)).unwrap();
        }
        let b = cur.into_inner();
        let extra_len = u32::from_be_bytes(b[60..64].try_into().unwrap());
        assert_eq!(extra_len % 4, 0, "name of {name_len} bytes");
        assert_eq!(extra_len as usize, 8 + (1 + name_len).next_multiple_of(4));
    }
}
