//! Static lookup tables
//!
//! Paper geometry is given in the job-start command's units (1/360 inch).
//! Media-size identifiers follow the printer's MSID numbering.

/// Media-size identifiers carried in the MediaSizeID field of `m setm`
pub mod msid {
    pub const A4: u8 = 0;
    pub const LETTER: u8 = 1;
    pub const LEGAL: u8 = 2;
    pub const A5: u8 = 3;
    pub const A6: u8 = 4;
    pub const B5: u8 = 5;
    pub const EXECUTIVE: u8 = 6;
    pub const HALFLETTER: u8 = 7;
    pub const PANORAMIC: u8 = 8;
    pub const TRIM_4X6: u8 = 9;
    pub const SIZE_4X6: u8 = 10;
    pub const SIZE_5X8: u8 = 11;
    pub const SIZE_8X10: u8 = 12;
    pub const SIZE_10X15: u8 = 13;
    pub const SIZE_200X300: u8 = 14;
    pub const L: u8 = 15;
    pub const POSTCARD: u8 = 16;
    pub const DBLPOSTCARD: u8 = 17;
    pub const ENV_10_L: u8 = 18;
    pub const ENV_C6_L: u8 = 19;
    pub const ENV_DL_L: u8 = 20;
    pub const NEWENV_L: u8 = 21;
    pub const CHOKEI_3: u8 = 22;
    pub const CHOKEI_4: u8 = 23;
    pub const YOKEI_1: u8 = 24;
    pub const YOKEI_2: u8 = 25;
    pub const YOKEI_3: u8 = 26;
    pub const YOKEI_4: u8 = 27;
    pub const SIZE_2L: u8 = 28;
    pub const ENV_10_P: u8 = 29;
    pub const ENV_C6_P: u8 = 30;
    pub const ENV_DL_P: u8 = 31;
    pub const NEWENV_P: u8 = 32;
    pub const MEISHI: u8 = 33;
    pub const BUZCARD_89X50: u8 = 34;
    pub const CARD_54X86: u8 = 35;
    pub const BUZCARD_55X91: u8 = 36;
    pub const ALBUM_L: u8 = 37;
    pub const ALBUM_A5: u8 = 38;
    pub const PALBUM_L_L: u8 = 39;
    pub const PALBUM_2L: u8 = 40;
    pub const PALBUM_A5_L: u8 = 41;
    pub const PALBUM_A4: u8 = 42;
    pub const HIVISION: u8 = 43;
    pub const KAKU_2: u8 = 44;
    pub const ENV_C4_P: u8 = 45;
    pub const B6: u8 = 46;
    pub const KAKU_20: u8 = 47;
    pub const A5_24HOLE: u8 = 48;
    pub const CHOKEI_40: u8 = 52;
    pub const QUADRAPLEPOSTCARD: u8 = 53;
    pub const YOKEI_0: u8 = 54;
    pub const ENV_C5_P: u8 = 56;
    pub const YOKEI_6: u8 = 57;
    pub const MEXICO_OFICIO: u8 = 58;
    pub const OFICIO9: u8 = 59;
    pub const INDIAN_LEGAL: u8 = 60;
    pub const A3NOBI: u8 = 61;
    pub const A3: u8 = 62;
    pub const B4: u8 = 63;
    pub const USB: u8 = 64;
    pub const SIZE_11X14: u8 = 65;
    pub const B3: u8 = 66;
    pub const A2: u8 = 67;
    pub const USC: u8 = 68;
    pub const SIZE_10X12: u8 = 69;
    pub const SIZE_12X12: u8 = 70;
    pub const SP1: u8 = 71;
    pub const SP2: u8 = 72;
    pub const SP3: u8 = 73;
    pub const SP4: u8 = 74;
    pub const SP5: u8 = 75;
    pub const SIZE_16K: u8 = 76;
    pub const SIZE_8K: u8 = 77;
    pub const SRA3: u8 = 84;
    pub const SIZE_12X18: u8 = 85;
    pub const SIZE_8_5X13: u8 = 86;
    pub const SQUARE_8_27: u8 = 87;
    pub const SQUARE_5: u8 = 88;
    pub const USER: u8 = 99;
    pub const SIZE_8X10_5: u8 = 104;
    pub const SIZE_8_27X13: u8 = 106;
    pub const ENV_B5_P: u8 = 111;
    pub const BANNER: u8 = 113;
    pub const SQUARE_3_5: u8 = 116;
    pub const SIZE_8X12: u8 = 117;
    pub const SQUARE_6: u8 = 118;
    pub const SIZE_4X8: u8 = 119;
    pub const SIZE_7X10: u8 = 120;
    pub const SIZE_3_5X2: u8 = 121;
    pub const SIZE_6X2: u8 = 122;
    pub const SIZE_8X5: u8 = 123;
    pub const SIZE_6X4: u8 = 124;
    pub const SIZE_8X4: u8 = 125;
    pub const HALFCUT: u8 = 128;
    pub const SIZE_16X20: u8 = 129;
    pub const SIZE_17X24: u8 = 141;
    pub const SIZE_30X40CM: u8 = 150;
    pub const SIZE_40X60CM: u8 = 151;
    pub const ARCH_A: u8 = 153;
    pub const ARCH_B: u8 = 154;
    pub const A3WNOBI: u8 = 157;
}

/// (PaperWidth, PaperLength) to media-size identifier
pub const PAPER_SIZES: &[((u32, u32), u8)] = &[
    ((2976, 4209), msid::A4),
    ((3060, 3960), msid::LETTER),
    ((3060, 5040), msid::LEGAL),
    ((2098, 2976), msid::A5),
    ((1488, 2098), msid::A6),
    ((2580, 3643), msid::B5),
    ((2611, 3780), msid::EXECUTIVE),
    ((1980, 3060), msid::HALFLETTER),
    ((2976, 8419), msid::PANORAMIC),
    ((1610, 2330), msid::TRIM_4X6),
    ((1440, 2160), msid::SIZE_4X6),
    ((1800, 2880), msid::SIZE_5X8),
    ((2880, 3600), msid::SIZE_8X10),
    ((1417, 2125), msid::SIZE_10X15),
    ((3061, 4790), msid::SIZE_200X300),
    ((1261, 1800), msid::L),
    ((1417, 2098), msid::POSTCARD),
    ((2835, 2098), msid::DBLPOSTCARD),
    ((3420, 1485), msid::ENV_10_L),
    ((2296, 1616), msid::ENV_C6_L),
    ((3118, 1559), msid::ENV_DL_L),
    ((3118, 1871), msid::NEWENV_L),
    ((1701, 3331), msid::CHOKEI_3),
    ((1276, 2906), msid::CHOKEI_4),
    ((1701, 2494), msid::YOKEI_1),
    ((1389, 2098), msid::YOKEI_3),
    ((1488, 3331), msid::YOKEI_4),
    ((1800, 2522), msid::SIZE_2L),
    ((1485, 3420), msid::ENV_10_P),
    ((1616, 2296), msid::ENV_C6_P),
    ((1559, 3118), msid::ENV_DL_P),
    ((1871, 3118), msid::NEWENV_P),
    ((1261, 779), msid::MEISHI),
    ((1261, 709), msid::BUZCARD_89X50),
    ((765, 1219), msid::CARD_54X86),
    ((780, 1290), msid::BUZCARD_55X91),
    ((1800, 2607), msid::ALBUM_L),
    ((2976, 4294), msid::ALBUM_A5),
    ((1800, 1260), msid::PALBUM_L_L),
    ((1800, 2521), msid::PALBUM_2L),
    ((2976, 2101), msid::PALBUM_A5_L),
    ((2976, 4203), msid::PALBUM_A4),
    ((1440, 2560), msid::HIVISION),
    ((3401, 4705), msid::KAKU_2),
    ((3245, 4592), msid::ENV_C4_P),
    ((1814, 2580), msid::B6),
    ((1276, 3189), msid::CHOKEI_40),
    ((2835, 4195), msid::QUADRAPLEPOSTCARD),
    ((2296, 3246), msid::ENV_C5_P),
    ((1389, 2693), msid::YOKEI_6),
    ((3060, 4825), msid::MEXICO_OFICIO),
    ((3046, 4465), msid::OFICIO9),
    ((3047, 4890), msid::INDIAN_LEGAL),
    ((4663, 6846), msid::A3NOBI),
    ((4209, 5953), msid::A3),
    ((3643, 5159), msid::B4),
    ((3960, 6120), msid::USB),
    ((3960, 5040), msid::SIZE_11X14),
    ((5159, 7299), msid::B3),
    ((5953, 8419), msid::A2),
    ((6120, 7920), msid::USC),
    ((3600, 4320), msid::SIZE_10X12),
    ((4320, 4320), msid::SIZE_12X12),
    ((2976, 3827), msid::SP1),
    ((2976, 2112), msid::SP2),
    ((1417, 2409), msid::SP3),
    ((1843, 2580), msid::SP4),
    ((2721, 1871), msid::SP5),
    ((2764, 3827), msid::SIZE_16K),
    ((3827, 5528), msid::SIZE_8K),
    ((4535, 6378), msid::SRA3),
    ((4320, 6480), msid::SIZE_12X18),
    ((3060, 4680), msid::SIZE_8_5X13),
    ((2976, 2976), msid::SQUARE_8_27),
    ((1800, 1800), msid::SQUARE_5),
    ((2880, 3780), msid::SIZE_8X10_5),
    ((2976, 4678), msid::SIZE_8_27X13),
    ((2494, 3543), msid::ENV_B5_P),
    ((4209, 12756), msid::BANNER),
    ((1260, 1260), msid::SQUARE_3_5),
    ((2880, 4320), msid::SIZE_8X12),
    ((2160, 2160), msid::SQUARE_6),
    ((1440, 2880), msid::SIZE_4X8),
    ((2522, 3600), msid::SIZE_7X10),
    ((1261, 720), msid::SIZE_3_5X2),
    ((2160, 720), msid::SIZE_6X2),
    ((2880, 1800), msid::SIZE_8X5),
    ((2160, 1440), msid::SIZE_6X4),
    ((2880, 1440), msid::SIZE_8X4),
    ((5040, 6120), msid::HALFCUT),
    ((5760, 7200), msid::SIZE_16X20),
    ((6120, 8646), msid::SIZE_17X24),
    ((4252, 5669), msid::SIZE_30X40CM),
    ((5669, 8504), msid::SIZE_40X60CM),
    ((3240, 4320), msid::ARCH_A),
    ((4663, 7923), msid::A3WNOBI),
];

/// Media-type identifiers carried in the MediaTypeID field of `q setq`
///
/// Not checked against the printer driver's media list. Only
/// `PREMIUM_GLOSSY` (0x0C) has been seen in a capture.
pub mod mtid {
    pub const PLAIN: u8 = 0;
    pub const INKJET_360: u8 = 1;
    pub const IRON_ON: u8 = 2;
    pub const PHOTO_INKJET: u8 = 3;
    pub const PHOTO_AD_SHEET: u8 = 4;
    pub const MATTE: u8 = 5;
    pub const PHOTO: u8 = 6;
    pub const PHOTO_STAND: u8 = 7;
    pub const RECYCLED: u8 = 8;
    pub const MINI_PHOTO: u8 = 9;
    pub const ENVELOPE: u8 = 10;
    pub const GLOSSY_PHOTO: u8 = 11;
    pub const PREMIUM_GLOSSY: u8 = 12;
    pub const ARCHIVAL_MATTE: u8 = 13;
    pub const HAGAKI_INKJET: u8 = 14;
    pub const PREMIUM_SEMIGLOSS: u8 = 15;
    pub const ULTRA_GLOSSY: u8 = 16;
    pub const PREMIUM_LUSTER: u8 = 17;
    pub const THICK_PAPER: u8 = 18;
    pub const LETTERHEAD: u8 = 19;
    pub const CD_DVD: u8 = 20;
}

/// Color lookup table used when the media type has no entry
pub const DEFAULT_LUT: u8 = 6;

/// Media type to color lookup table for automatic color management
///
/// Not checked against the printer driver. Media without an entry use
/// [`DEFAULT_LUT`].
pub const MEDIA_LUTS: &[(u8, u8)] = &[
    (mtid::PLAIN, 0),
    (mtid::INKJET_360, 0),
    (mtid::RECYCLED, 0),
    (mtid::LETTERHEAD, 0),
    (mtid::THICK_PAPER, 0),
    (mtid::ENVELOPE, 0),
    (mtid::MATTE, 1),
    (mtid::ARCHIVAL_MATTE, 1),
    (mtid::PHOTO_INKJET, 1),
    (mtid::HAGAKI_INKJET, 1),
    (mtid::PHOTO, 2),
    (mtid::GLOSSY_PHOTO, 2),
    (mtid::MINI_PHOTO, 2),
    (mtid::PREMIUM_GLOSSY, 3),
    (mtid::ULTRA_GLOSSY, 3),
    (mtid::PREMIUM_SEMIGLOSS, 5),
    (mtid::PREMIUM_LUSTER, 5),
];

/// Look up the media-size identifier for a paper geometry
pub fn paper_size_for(width: u32, length: u32) -> Option<u8> {
    PAPER_SIZES
        .iter()
        .find(|(dims, _)| *dims == (width, length))
        .map(|(_, id)| *id)
}

/// Color lookup table for a media type, [`DEFAULT_LUT`] when unmapped
pub fn lut_for_media(media_type_id: u8) -> u8 {
    MEDIA_LUTS
        .iter()
        .find(|(media, _)| *media == media_type_id)
        .map_or(DEFAULT_LUT, |(_, lut)| *lut)
}
