/// Speaker-position bits used in `dwChannelMask`.
pub const SPEAKER_FRONT_LEFT: u32 = 0x1;
pub const SPEAKER_FRONT_RIGHT: u32 = 0x2;
pub const SPEAKER_FRONT_CENTER: u32 = 0x4;
pub const SPEAKER_LOW_FREQUENCY: u32 = 0x8;
pub const SPEAKER_BACK_LEFT: u32 = 0x10;
pub const SPEAKER_BACK_RIGHT: u32 = 0x20;
pub const SPEAKER_FRONT_LEFT_OF_CENTER: u32 = 0x40;
pub const SPEAKER_FRONT_RIGHT_OF_CENTER: u32 = 0x80;
pub const SPEAKER_BACK_CENTER: u32 = 0x100;
pub const SPEAKER_SIDE_LEFT: u32 = 0x200;
pub const SPEAKER_SIDE_RIGHT: u32 = 0x400;
pub const SPEAKER_TOP_CENTER: u32 = 0x800;
pub const SPEAKER_TOP_FRONT_LEFT: u32 = 0x1000;
pub const SPEAKER_TOP_FRONT_CENTER: u32 = 0x2000;
pub const SPEAKER_TOP_FRONT_RIGHT: u32 = 0x4000;
pub const SPEAKER_TOP_BACK_LEFT: u32 = 0x8000;
pub const SPEAKER_TOP_BACK_CENTER: u32 = 0x10000;
pub const SPEAKER_TOP_BACK_RIGHT: u32 = 0x20000;

const STEREO: u32 = SPEAKER_FRONT_LEFT | SPEAKER_FRONT_RIGHT;
const SURROUND_3_0: u32 = STEREO | SPEAKER_FRONT_CENTER;
const QUAD: u32 = STEREO | SPEAKER_BACK_LEFT | SPEAKER_BACK_RIGHT;
const QUAD_SIDE: u32 = STEREO | SPEAKER_SIDE_LEFT | SPEAKER_SIDE_RIGHT;
const SURROUND_4_0: u32 = SURROUND_3_0 | SPEAKER_BACK_CENTER;
const SURROUND_5_0: u32 = SURROUND_3_0 | SPEAKER_BACK_LEFT | SPEAKER_BACK_RIGHT;
const SURROUND_5_0_SIDE: u32 = SURROUND_3_0 | SPEAKER_SIDE_LEFT | SPEAKER_SIDE_RIGHT;
const SURROUND_5_1: u32 = SURROUND_5_0 | SPEAKER_LOW_FREQUENCY;
const SURROUND_5_1_SIDE: u32 = SURROUND_5_0_SIDE | SPEAKER_LOW_FREQUENCY;
const SURROUND_6_1: u32 = SURROUND_5_1 | SPEAKER_BACK_CENTER;
const SURROUND_6_1_SIDE: u32 = SURROUND_5_1_SIDE | SPEAKER_BACK_CENTER;
const SURROUND_7_1: u32 = SURROUND_5_1 | SPEAKER_SIDE_LEFT | SPEAKER_SIDE_RIGHT;
const SURROUND_7_1_WIDE: u32 =
    SURROUND_5_1 | SPEAKER_FRONT_LEFT_OF_CENTER | SPEAKER_FRONT_RIGHT_OF_CENTER;

const NAMED_LAYOUTS: &[(u32, &str)] = &[
    (SPEAKER_FRONT_CENTER, "mono"),
    (STEREO, "stereo"),
    (STEREO | SPEAKER_LOW_FREQUENCY, "stereo + LFE"),
    (SURROUND_3_0, "3.0"),
    (SURROUND_3_0 | SPEAKER_LOW_FREQUENCY, "3.1"),
    (QUAD, "quad"),
    (QUAD_SIDE, "quad (side)"),
    (SURROUND_4_0, "4.0"),
    (SURROUND_5_0, "5.0"),
    (SURROUND_5_0_SIDE, "5.0 (side)"),
    (SURROUND_5_1, "5.1"),
    (SURROUND_5_1_SIDE, "5.1 (side)"),
    (SURROUND_6_1, "6.1"),
    (SURROUND_6_1_SIDE, "6.1 (side)"),
    (SURROUND_7_1, "7.1"),
    (SURROUND_7_1_WIDE, "7.1 (wide)"),
];

/// Short human-readable label for a channel mask.
///
/// Known speaker combinations map to their common names; anything else
/// falls back to a channel count.
pub fn describe(mask: u32) -> String {
    if mask == 0 {
        return "unspecified layout".into();
    }
    NAMED_LAYOUTS
        .iter()
        .find(|(bits, _)| *bits == mask)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("{} channels (custom layout)", mask.count_ones()))
}

/// Canonical mask for a bare channel count. Returns 0 when no convention exists.
pub fn guess_channel_mask(channels: u16) -> u32 {
    match channels {
        1 => SPEAKER_FRONT_CENTER,
        2 => STEREO,
        3 => SURROUND_3_0,
        4 => QUAD,
        5 => SURROUND_5_0,
        6 => SURROUND_5_1,
        7 => SURROUND_6_1,
        8 => SURROUND_7_1,
        _ => 0,
    }
}
