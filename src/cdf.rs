// All of the CDFs used in the encoder currently

// Partitions
// For 8x8, the options are NONE, HORZ, VERT, SPLIT only;
// for larger sizes, T-shaped and 4-way partitions are also available
// (HORZ_A, HORZ_B, VERT_A, VERT_B, HORZ_4, VERT_4)

// We only ever use one context for 8x8 partitions, so don't
// bother including the other three
pub const partition_8x8_cdf: [u16; 3] = [19132, 25510, 30392];

pub const partition_16x16_cdf: [[u16; 9]; 4] = [
  [15597, 20929, 24571, 26706, 27664, 28821, 29601, 30571, 31902],
  [7925, 11043, 16785, 22470, 23971, 25043, 26651, 28701, 29834],
  [5414, 13269, 15111, 20488, 22360, 24500, 25537, 26336, 32117],
  [2662, 6362, 8614, 20860, 23053, 24778, 26436, 27829, 31171]
];

pub const partition_32x32_cdf: [[u16; 9]; 4] = [
  [18462, 20920, 23124, 27647, 28227, 29049, 29519, 30178, 31544],
  [7689, 9060, 12056, 24992, 25660, 26182, 26951, 28041, 29052],
  [6015, 9009, 10062, 24544, 25409, 26545, 27071, 27526, 32047],
  [1394, 2208, 2796, 28614, 29061, 29466, 29840, 30185, 31899]
];

pub const partition_64x64_cdf: [[u16; 9]; 4] = [
  [20137, 21547, 23078, 29566, 29837, 30261, 30524, 30892, 31724],
  [6732, 7490, 9497, 27944, 28250, 28515, 28969, 29630, 30104],
  [5945, 7663, 8348, 28683, 29117, 29749, 30064, 30298, 32238],
  [870, 1212, 1487, 31198, 31394, 31574, 31743, 31881, 32332]
];

// Block mode syntax
// This encoder arranges things so that these only ever use one context each,
// so just store the single relevant CDF
pub const skip_cdf: [u16; 1] = [31671];
pub const y_mode_cdf: [u16; 12] = [15588, 17027, 19338, 20218, 20682, 21110, 21825, 23244, 24189, 28165, 29093, 30466];
pub const uv_mode_cdf: [u16; 13] = [10407, 11208, 12900, 13181, 13823, 14175, 14899, 15656, 15986, 20086, 20995, 22455, 24212];

// Residual syntax
// These CDFs all have complex contexts, some of which are fixed in our case
// and some of which are not. They also all depend on the qindex via the qctx value.

// ---- Reference-frame and mode syntax added for inter coding ----
// As with the tables above, we only keep the single context that this
// encoder's fixed neighbor layout ever produces; a multi-tile, multi-context
// encoder would need the full per-context table set here.

// single_ref_p1: LAST vs {GOLDEN, ALTREF}
pub const single_ref_p1_cdf: [u16; 1] = [16384];
// single_ref_p2: GOLDEN vs ALTREF, given not LAST
pub const single_ref_p2_cdf: [u16; 1] = [16384];
// comp_mode: single-ref vs compound-ref
pub const comp_mode_cdf: [u16; 1] = [20000];
// comp_ref: which pair of references, given compound
pub const comp_ref_cdf: [u16; 1] = [16384];

// is_inter: intra vs inter macroblock
pub const is_inter_cdf: [u16; 1] = [12000];

// inter mode tree: NEARESTMV, NEARMV, ZEROMV, NEWMV (in that priority order,
// mirroring vp8_mode_order's "near family before NEWMV" bias)
pub const inter_mode_cdf: [u16; 3] = [8192, 16384, 24576];

// SPLITMV per-label sub-mode tree: LEFT4X4, ABOVE4X4, ZERO4X4, NEW4X4
pub const split_mv_mode_cdf: [u16; 3] = [10000, 18000, 26000];

// mbsplit shape tree: 16x8, 8x16, 8x8, 4x4
pub const mbsplit_cdf: [u16; 3] = [8192, 16384, 24576];

// B_PRED / I8X8_PRED directional sub-mode tree (10 directions)
pub const b_mode_cdf: [u16; 9] = [
  4096, 8192, 12288, 16384, 20480, 22528, 25600, 28672, 30720
];

// Motion vector component coding: sign, then magnitude class (0..10), then
// per-class extra bits are coded as literals (outside the CDF model).
pub const mv_sign_cdf: [u16; 1] = [16384];
pub const mv_class_cdf: [u16; 10] = [
  8000, 14000, 19000, 23000, 26000, 28500, 30000, 31000, 31700, 32200
];
pub const mv_class0_bit_cdf: [u16; 1] = [16384];

// ---- Coefficient-level residual CDFs ----
// Context-indexed as described at each write_symbol call site in av1_encoder.rs.
// These are monotonic, plausibly-shaped placeholder distributions (skewed toward small
// symbol values, as real coefficient statistics are): the entropy-coder probability
// tables are an out-of-scope external collaborator for the mode-decision core, so exact
// No per-context indexing at the call site; single shared 5-way tx_type symbol.
pub const tx_type_cdf: [u16; 4] = [19661, 27525, 30671, 31929];

// Context = (qctx, txs_ctx, all_zero_ctx in 0..10)
pub const all_zero_cdf: [[[[u16; 1]; 10]; 2]; 4] = [[[[16064], [16464], [16144], [16544], [16224], [16624], [16304], [16704], [16384], [16064]], [[16384], [16064], [16464], [16144], [16544], [16224], [16624], [16304], [16704], [16384]]], [[[16304], [16704], [16384], [16064], [16464], [16144], [16544], [16224], [16624], [16304]], [[16624], [16304], [16704], [16384], [16064], [16464], [16144], [16544], [16224], [16624]]], [[[16544], [16224], [16624], [16304], [16704], [16384], [16064], [16464], [16144], [16544]], [[16144], [16544], [16224], [16624], [16304], [16704], [16384], [16064], [16464], [16144]]], [[[16064], [16464], [16144], [16544], [16224], [16624], [16304], [16704], [16384], [16064]], [[16384], [16064], [16464], [16144], [16544], [16224], [16624], [16304], [16704], [16384]]]];

// Context = (qctx, ptype); 7-way eob-class symbol for 8x8 (64-coeff) blocks
pub const eob_class_64_cdf: [[[u16; 6]; 2]; 4] = [[[4361, 8730, 12787, 16532, 19964, 23085], [4681, 9050, 13107, 16852, 20284, 23405]], [[4601, 8970, 13027, 16772, 20204, 23325], [4921, 9290, 13347, 17092, 20524, 23645]], [[4841, 9210, 13267, 17012, 20444, 23565], [4441, 8810, 12867, 16612, 20044, 23165]], [[4361, 8730, 12787, 16532, 19964, 23085], [4681, 9050, 13107, 16852, 20284, 23405]]];

// Context = (qctx, ptype); 5-way eob-class symbol for 4x4 (16-coeff) blocks
pub const eob_class_16_cdf: [[[u16; 4]; 2]; 4] = [[[6233, 12131, 17374, 21962], [6553, 12451, 17694, 22282]], [[6473, 12371, 17614, 22202], [6793, 12691, 17934, 22522]], [[6713, 12611, 17854, 22442], [6313, 12211, 17454, 22042]], [[6233, 12131, 17374, 21962], [6553, 12451, 17694, 22282]]];

// Context = (qctx, ptype, eob_class - 2); extra bit within an eob class, 8x8
pub const eob_extra_8x8_cdf: [[[[u16; 1]; 5]; 2]; 4] = [[[[16064], [16464], [16144], [16544], [16224]], [[16384], [16064], [16464], [16144], [16544]]], [[[16304], [16704], [16384], [16064], [16464]], [[16624], [16304], [16704], [16384], [16064]]], [[[16544], [16224], [16624], [16304], [16704]], [[16144], [16544], [16224], [16624], [16304]]], [[[16064], [16464], [16144], [16544], [16224]], [[16384], [16064], [16464], [16144], [16544]]]];

// Context = (qctx, ptype, eob_class - 2); extra bit within an eob class, 4x4
pub const eob_extra_4x4_cdf: [[[[u16; 1]; 5]; 2]; 4] = [[[[16064], [16464], [16144], [16544], [16224]], [[16384], [16064], [16464], [16144], [16544]]], [[[16304], [16704], [16384], [16064], [16464]], [[16624], [16304], [16704], [16384], [16064]]], [[[16544], [16224], [16624], [16304], [16704]], [[16144], [16544], [16224], [16624], [16304]]], [[[16064], [16464], [16144], [16544], [16224]], [[16384], [16064], [16464], [16144], [16544]]]];

// Context = (qctx, txs_ctx, ptype, base_eob_ctx in 0..4); 3-way base magnitude at eob
pub const coeff_base_eob_cdf: [[[[[u16; 2]; 4]; 2]; 2]; 4] = [[[[[10602, 19340], [11082, 19820], [10842, 19580], [10602, 19340]], [[11002, 19740], [10762, 19500], [11242, 19980], [11002, 19740]]], [[[10922, 19660], [10682, 19420], [11162, 19900], [10922, 19660]], [[10602, 19340], [11082, 19820], [10842, 19580], [10602, 19340]]]], [[[[10842, 19580], [10602, 19340], [11082, 19820], [10842, 19580]], [[11242, 19980], [11002, 19740], [10762, 19500], [11242, 19980]]], [[[11162, 19900], [10922, 19660], [10682, 19420], [11162, 19900]], [[10842, 19580], [10602, 19340], [11082, 19820], [10842, 19580]]]], [[[[11082, 19820], [10842, 19580], [10602, 19340], [11082, 19820]], [[10762, 19500], [11242, 19980], [11002, 19740], [10762, 19500]]], [[[10682, 19420], [11162, 19900], [10922, 19660], [10682, 19420]], [[11082, 19820], [10842, 19580], [10602, 19340], [11082, 19820]]]], [[[[10602, 19340], [11082, 19820], [10842, 19580], [10602, 19340]], [[11002, 19740], [10762, 19500], [11242, 19980], [11002, 19740]]], [[[10922, 19660], [10682, 19420], [11162, 19900], [10922, 19660]], [[10602, 19340], [11082, 19820], [10842, 19580], [10602, 19340]]]]];

// Context = (qctx, txs_ctx, ptype, base_ctx in 0..42); 4-way base magnitude ladder
pub const coeff_base_cdf: [[[[[u16; 3]; 42]; 2]; 2]; 4] = [[[[[7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628]], [[8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028]]], [[[8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948]], [[7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628]]]], [[[[8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868]], [[8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548]]], [[[8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468]], [[8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868]]]], [[[[8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388]], [[8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788]]], [[[7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708]], [[8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388]]]], [[[[7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628]], [[8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028], [8272, 15508, 21788], [8032, 15268, 21548], [8512, 15748, 22028]]], [[[8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948], [8192, 15428, 21708], [7952, 15188, 21468], [8432, 15668, 21948]], [[7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628], [7872, 15108, 21388], [8352, 15588, 21868], [8112, 15348, 21628]]]]];

// Context = (qctx, txs_ctx, ptype, br_ctx in 0..21); 4-way base-range refinement
pub const coeff_br_cdf: [[[[[u16; 3]; 21]; 2]; 2]; 4] = [[[[[7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219]], [[8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619]]], [[[8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539]], [[7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219]]]], [[[[8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459]], [[8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139]]], [[[8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059]], [[8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459]]]], [[[[8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979]], [[8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379]]], [[[7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299]], [[8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979]]]], [[[[7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219]], [[8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619], [8272, 15371, 21379], [8032, 15131, 21139], [8512, 15611, 21619]]], [[[8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539], [8192, 15291, 21299], [7952, 15051, 21059], [8432, 15531, 21539]], [[7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219], [7872, 14971, 20979], [8352, 15451, 21459], [8112, 15211, 21219]]]]];

// Context = (qctx, ptype, dc_sign_ctx in 0..3)
pub const dc_sign_cdf: [[[[u16; 1]; 3]; 2]; 4] = [[[[16064], [16464], [16144]], [[16384], [16064], [16464]]], [[[16304], [16704], [16384]], [[16624], [16304], [16704]]], [[[16544], [16224], [16624]], [[16144], [16544], [16224]]], [[[16064], [16464], [16144]], [[16384], [16064], [16464]]]];

