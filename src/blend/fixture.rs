//! Synthetic blend images for unit tests.
//!
//! The format is self-describing, so tests build complete files in memory
//! instead of shipping binary samples: a small schema catalog plus a block
//! graph shaped like a producer scene (window manager, screen, scene, camera,
//! render views, and a property tree), emitted for any endianness and
//! pointer width.

use crate::blend::Endianness;

pub(crate) const ADDR_WM: u64 = 0x1000;
pub(crate) const ADDR_WINDOW: u64 = 0x1100;
pub(crate) const ADDR_SCREEN: u64 = 0x1200;
pub(crate) const ADDR_SCENE: u64 = 0x1300;
pub(crate) const ADDR_CAMERA_OBJECT: u64 = 0x1400;
pub(crate) const ADDR_CAMERA_DATA: u64 = 0x1500;
pub(crate) const ADDR_VIEW: [u64; 4] = [0x1600, 0x1610, 0x1620, 0x1630];
pub(crate) const ADDR_PROPS_ROOT: u64 = 0x1700;
pub(crate) const ADDR_PROP_CYCLES: u64 = 0x1800;
pub(crate) const ADDR_PROP_SAMPLES: u64 = 0x1900;
pub(crate) const ADDR_PROP_DEVICE: u64 = 0x1A00;
pub(crate) const ADDR_DEVICE_TEXT: u64 = 0x1B00;
pub(crate) const ADDR_PROP_GAMMA: u64 = 0x1C00;
pub(crate) const ADDR_PROP_EXPOSURE: u64 = 0x1D00;
pub(crate) const ADDR_PROP_LAYERS: u64 = 0x1E00;
pub(crate) const ADDR_LAYERS_DATA: u64 = 0x1F00;
pub(crate) const ADDR_PAIR_BLOCK: u64 = 0x2000;
/// Address never assigned to any block.
pub(crate) const ADDR_DANGLING: u64 = 0xD00D;

pub(crate) const SDNA_LINK: u32 = 0;
pub(crate) const SDNA_RENDER_VIEW: u32 = 5;
pub(crate) const SDNA_SCENE: u32 = 7;

pub(crate) const VIEW_NAMES: [&str; 4] = ["west", "east", "北", "south"];
pub(crate) const VIEW_FLAGS: [i32; 4] = [0, 0, 1, 0];
pub(crate) const SCENE_NAME: &str = "SC猿のシーン";
pub(crate) const CAMERA_OBJECT_NAME: &str = "OBMainCamera";
pub(crate) const CAMERA_LENS: f32 = 37.22;
pub(crate) const CYCLES_SAMPLES: i32 = 72;
pub(crate) const CYCLES_DEVICE: &str = "CPU";
pub(crate) const CYCLES_GAMMA: f64 = 2.2;
pub(crate) const CYCLES_EXPOSURE: f32 = 1.5;
pub(crate) const CYCLES_LAYERS: [i32; 3] = [10, 20, 30];

/// Every (endianness, pointer width) combination the format allows.
pub(crate) const VARIANTS: [(Endianness, usize); 4] = [
	(Endianness::Little, 8),
	(Endianness::Little, 4),
	(Endianness::Big, 8),
	(Endianness::Big, 4),
];

/// Switches for producing deliberately malformed images.
pub(crate) struct FixtureOptions {
	pub endianness: Endianness,
	pub pointer_size: usize,
	/// Loop the view list back onto its first element.
	pub views_cycle: bool,
	/// Leave out the DNA1 block entirely.
	pub omit_dna: bool,
	/// Give the screen block the window manager's address.
	pub duplicate_address: bool,
	/// Inflate the Scene TLEN entry past its field extents.
	pub corrupt_scene_tlen: bool,
	/// Drop the trailing bytes of the final block's payload.
	pub truncate_tail: bool,
}

impl FixtureOptions {
	pub fn new(endianness: Endianness, pointer_size: usize) -> Self {
		Self {
			endianness,
			pointer_size,
			views_cycle: false,
			omit_dna: false,
			duplicate_address: false,
			corrupt_scene_tlen: false,
			truncate_tail: false,
		}
	}
}

/// Build a well-formed fixture image for one variant.
pub(crate) fn build(endianness: Endianness, pointer_size: usize) -> Vec<u8> {
	build_with(&FixtureOptions::new(endianness, pointer_size))
}

/// Build a fixture image honoring the malformation switches.
pub(crate) fn build_with(opt: &FixtureOptions) -> Vec<u8> {
	let endianness = opt.endianness;
	let p = opt.pointer_size;
	let mut out = Writer::new(endianness, p);

	out.raw(b"BLENDER");
	out.raw(if p == 4 { b"_" } else { b"-" });
	out.raw(match endianness {
		Endianness::Little => b"v",
		Endianness::Big => b"V",
	});
	out.raw(b"300");

	let wm = wm_payload(endianness, p);
	push_block(&mut out, b"WM\0\0", 12, 1, ADDR_WM, &wm);

	let window = window_payload(endianness, p);
	push_block(&mut out, b"DATA", 11, 1, ADDR_WINDOW, &window);

	let screen = screen_payload(endianness, p);
	let screen_addr = if opt.duplicate_address { ADDR_WM } else { ADDR_SCREEN };
	push_block(&mut out, b"SR\0\0", 10, 1, screen_addr, &screen);

	let scene = scene_payload(endianness, p);
	push_block(&mut out, b"SC\0\0", SDNA_SCENE, 1, ADDR_SCENE, &scene);

	let camera_object = camera_object_payload(endianness, p);
	push_block(&mut out, b"OB\0\0", 8, 1, ADDR_CAMERA_OBJECT, &camera_object);

	let camera_data = camera_data_payload(endianness, p);
	push_block(&mut out, b"CA\0\0", 9, 1, ADDR_CAMERA_DATA, &camera_data);

	for idx in 0..4 {
		let next = if idx + 1 < 4 {
			ADDR_VIEW[idx + 1]
		} else if opt.views_cycle {
			ADDR_VIEW[0]
		} else {
			0
		};
		let prev = if idx > 0 { ADDR_VIEW[idx - 1] } else { 0 };
		let view = render_view_payload(endianness, p, next, prev, VIEW_NAMES[idx], VIEW_FLAGS[idx]);
		push_block(&mut out, b"DATA", SDNA_RENDER_VIEW, 1, ADDR_VIEW[idx], &view);
	}

	let root = idprop_payload(endianness, p, &IdProp {
		kind: 6,
		name: "",
		group: (ADDR_PROP_CYCLES, ADDR_PROP_CYCLES),
		..IdProp::default()
	});
	push_block(&mut out, b"DATA", 4, 1, ADDR_PROPS_ROOT, &root);

	let cycles = idprop_payload(endianness, p, &IdProp {
		kind: 6,
		name: "cycles",
		group: (ADDR_PROP_SAMPLES, ADDR_PROP_LAYERS),
		..IdProp::default()
	});
	push_block(&mut out, b"DATA", 4, 1, ADDR_PROP_CYCLES, &cycles);

	let samples = idprop_payload(endianness, p, &IdProp {
		kind: 1,
		name: "samples",
		next: ADDR_PROP_DEVICE,
		val: CYCLES_SAMPLES,
		..IdProp::default()
	});
	push_block(&mut out, b"DATA", 4, 1, ADDR_PROP_SAMPLES, &samples);

	let device = idprop_payload(endianness, p, &IdProp {
		kind: 0,
		name: "device",
		next: ADDR_PROP_GAMMA,
		prev: ADDR_PROP_SAMPLES,
		pointer: ADDR_DEVICE_TEXT,
		len: CYCLES_DEVICE.len() as i32 + 1,
		..IdProp::default()
	});
	push_block(&mut out, b"DATA", 4, 1, ADDR_PROP_DEVICE, &device);

	let mut text = CYCLES_DEVICE.as_bytes().to_vec();
	text.push(0);
	push_block(&mut out, b"DATA", SDNA_LINK, text.len() as u32, ADDR_DEVICE_TEXT, &text);

	let gamma_bits = CYCLES_GAMMA.to_bits();
	let (gamma_val, gamma_val2) = match endianness {
		Endianness::Little => (gamma_bits as u32 as i32, (gamma_bits >> 32) as u32 as i32),
		Endianness::Big => ((gamma_bits >> 32) as u32 as i32, gamma_bits as u32 as i32),
	};
	let gamma = idprop_payload(endianness, p, &IdProp {
		kind: 8,
		name: "gamma",
		next: ADDR_PROP_EXPOSURE,
		prev: ADDR_PROP_DEVICE,
		val: gamma_val,
		val2: gamma_val2,
		..IdProp::default()
	});
	push_block(&mut out, b"DATA", 4, 1, ADDR_PROP_GAMMA, &gamma);

	let exposure = idprop_payload(endianness, p, &IdProp {
		kind: 2,
		name: "exposure",
		next: ADDR_PROP_LAYERS,
		prev: ADDR_PROP_GAMMA,
		val: CYCLES_EXPOSURE.to_bits() as i32,
		..IdProp::default()
	});
	push_block(&mut out, b"DATA", 4, 1, ADDR_PROP_EXPOSURE, &exposure);

	let layers = idprop_payload(endianness, p, &IdProp {
		kind: 5,
		subtype: 1,
		name: "layers",
		prev: ADDR_PROP_EXPOSURE,
		pointer: ADDR_LAYERS_DATA,
		len: CYCLES_LAYERS.len() as i32,
		..IdProp::default()
	});
	push_block(&mut out, b"DATA", 4, 1, ADDR_PROP_LAYERS, &layers);

	let mut layers_data = Writer::new(endianness, p);
	for value in CYCLES_LAYERS {
		layers_data.i32v(value);
	}
	let layers_data = layers_data.into_bytes();
	push_block(&mut out, b"DATA", SDNA_LINK, CYCLES_LAYERS.len() as u32, ADDR_LAYERS_DATA, &layers_data);

	// Two contiguous RenderView instances in one block, for element access.
	let mut pair = render_view_payload(endianness, p, 0, 0, "alpha", 7);
	pair.extend_from_slice(&render_view_payload(endianness, p, 0, 0, "beta", 9));
	push_block(&mut out, b"DATA", SDNA_RENDER_VIEW, 2, ADDR_PAIR_BLOCK, &pair);

	if !opt.omit_dna {
		let dna = dna_payload(endianness, p, opt.corrupt_scene_tlen);
		push_block(&mut out, b"DNA1", 0, 1, 0, &dna);
	}

	push_block(&mut out, b"ENDB", 0, 0, 0, &[]);

	let mut bytes = out.into_bytes();
	if opt.truncate_tail {
		bytes.truncate(bytes.len() - 8);
	}
	bytes
}

struct IdProp<'a> {
	kind: u8,
	subtype: u8,
	name: &'a str,
	next: u64,
	prev: u64,
	group: (u64, u64),
	pointer: u64,
	val: i32,
	val2: i32,
	len: i32,
}

impl Default for IdProp<'_> {
	fn default() -> Self {
		Self {
			kind: 0,
			subtype: 0,
			name: "",
			next: 0,
			prev: 0,
			group: (0, 0),
			pointer: 0,
			val: 0,
			val2: 0,
			len: 0,
		}
	}
}

fn push_block(out: &mut Writer, code: &[u8; 4], sdna_nr: u32, nr: u32, addr: u64, payload: &[u8]) {
	out.raw(code);
	out.i32v(payload.len() as i32);
	out.ptr(addr);
	out.u32v(sdna_nr);
	out.i32v(nr as i32);
	out.raw(payload);
}

fn id_fields(w: &mut Writer, name: &str, properties: u64) {
	w.ptr(0);
	w.ptr(0);
	w.fixed_str(name, 66);
	w.u16v(0);
	w.ptr(properties);
}

fn wm_payload(endianness: Endianness, p: usize) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	id_fields(&mut w, "WMWinMan", 0);
	w.ptr(ADDR_WINDOW);
	w.ptr(ADDR_WINDOW);
	w.ptr(ADDR_WINDOW);
	w.into_bytes()
}

fn window_payload(endianness: Endianness, p: usize) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	w.ptr(0);
	w.ptr(0);
	w.ptr(ADDR_SCREEN);
	w.i32v(1);
	w.into_bytes()
}

fn screen_payload(endianness: Endianness, p: usize) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	id_fields(&mut w, "SRLayout", 0);
	w.ptr(ADDR_SCENE);
	w.into_bytes()
}

fn scene_payload(endianness: Endianness, p: usize) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	id_fields(&mut w, SCENE_NAME, ADDR_PROPS_ROOT);
	w.ptr(ADDR_CAMERA_OBJECT);
	w.i32v(1);
	w.i32v(250);
	w.i32v(101);
	w.i32v(1920);
	w.i32v(1080);
	w.ptr(ADDR_VIEW[0]);
	w.ptr(ADDR_VIEW[3]);
	w.into_bytes()
}

fn camera_object_payload(endianness: Endianness, p: usize) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	id_fields(&mut w, CAMERA_OBJECT_NAME, 0);
	w.ptr(ADDR_CAMERA_DATA);
	w.f32v(0.0);
	w.f32v(0.0);
	w.f32v(0.0);
	w.into_bytes()
}

fn camera_data_payload(endianness: Endianness, p: usize) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	id_fields(&mut w, "CAMainCamera", ADDR_DANGLING);
	w.f32v(CAMERA_LENS);
	w.into_bytes()
}

fn render_view_payload(endianness: Endianness, p: usize, next: u64, prev: u64, name: &str, viewflag: i32) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	w.ptr(next);
	w.ptr(prev);
	w.fixed_str(name, 64);
	w.i32v(viewflag);
	w.into_bytes()
}

fn idprop_payload(endianness: Endianness, p: usize, prop: &IdProp<'_>) -> Vec<u8> {
	let mut w = Writer::new(endianness, p);
	w.ptr(prop.next);
	w.ptr(prop.prev);
	w.raw(&[prop.kind, prop.subtype]);
	w.u16v(0);
	w.fixed_str(prop.name, 64);
	w.i32v(0);
	w.ptr(prop.pointer);
	w.ptr(prop.group.0);
	w.ptr(prop.group.1);
	w.i32v(prop.val);
	w.i32v(prop.val2);
	w.i32v(prop.len);
	w.i32v(0);
	w.into_bytes()
}

pub(crate) fn dna_payload(endianness: Endianness, p: usize, corrupt_scene_tlen: bool) -> Vec<u8> {
	let names: [&str; 36] = [
		"*next",
		"*prev",
		"*first",
		"*last",
		"name[66]",
		"flag",
		"*properties",
		"*pointer",
		"group",
		"val",
		"val2",
		"type",
		"subtype",
		"name[64]",
		"saved",
		"data",
		"len",
		"totallen",
		"viewflag",
		"sfra",
		"efra",
		"cfra",
		"xsch",
		"ysch",
		"views",
		"id",
		"*camera",
		"r",
		"*data",
		"loc[3]",
		"lens",
		"*scene",
		"*screen",
		"winid",
		"*winactive",
		"windows",
	];

	let pu = p as u16;
	let types: [(&str, u16); 23] = [
		("char", 1),
		("uchar", 1),
		("short", 2),
		("ushort", 2),
		("int", 4),
		("float", 4),
		("double", 8),
		("int64_t", 8),
		("uint64_t", 8),
		("void", 0),
		("Link", 2 * pu),
		("ListBase", 2 * pu),
		("ID", 3 * pu + 68),
		("IDPropertyData", 3 * pu + 8),
		("IDProperty", 5 * pu + 88),
		("RenderView", 2 * pu + 68),
		("RenderData", 2 * pu + 20),
		("Scene", 6 * pu + 88 + if corrupt_scene_tlen { 2 } else { 0 }),
		("Object", 4 * pu + 80),
		("Camera", 3 * pu + 72),
		("bScreen", 4 * pu + 68),
		("wmWindow", 3 * pu + 4),
		("wmWindowManager", 6 * pu + 68),
	];

	let structs: [(u16, &[(u16, u16)]); 13] = [
		(10, &[(10, 0), (10, 1)]),
		(11, &[(9, 2), (9, 3)]),
		(12, &[(9, 0), (9, 1), (0, 4), (2, 5), (14, 6)]),
		(13, &[(9, 7), (11, 8), (4, 9), (4, 10)]),
		(14, &[(14, 0), (14, 1), (0, 11), (0, 12), (2, 5), (0, 13), (4, 14), (13, 15), (4, 16), (4, 17)]),
		(15, &[(15, 0), (15, 1), (0, 13), (4, 18)]),
		(16, &[(4, 19), (4, 20), (4, 21), (4, 22), (4, 23), (11, 24)]),
		(17, &[(12, 25), (18, 26), (16, 27)]),
		(18, &[(12, 25), (9, 28), (5, 29)]),
		(19, &[(12, 25), (5, 30)]),
		(20, &[(12, 25), (17, 31)]),
		(21, &[(21, 0), (21, 1), (20, 32), (4, 33)]),
		(22, &[(12, 25), (21, 34), (11, 35)]),
	];

	let mut w = Writer::new(endianness, p);
	w.raw(b"SDNA");

	w.raw(b"NAME");
	w.u32v(names.len() as u32);
	for name in names {
		w.raw(name.as_bytes());
		w.raw(&[0]);
	}
	w.align4();

	w.raw(b"TYPE");
	w.u32v(types.len() as u32);
	for (name, _) in types {
		w.raw(name.as_bytes());
		w.raw(&[0]);
	}
	w.align4();

	w.raw(b"TLEN");
	for (_, size) in types {
		w.u16v(size);
	}
	w.align4();

	w.raw(b"STRC");
	w.u32v(structs.len() as u32);
	for (type_idx, fields) in structs {
		w.u16v(type_idx);
		w.u16v(fields.len() as u16);
		for (field_type, field_name) in fields {
			w.u16v(*field_type);
			w.u16v(*field_name);
		}
	}

	w.into_bytes()
}

struct Writer {
	buf: Vec<u8>,
	endianness: Endianness,
	pointer_size: usize,
}

impl Writer {
	fn new(endianness: Endianness, pointer_size: usize) -> Self {
		Self {
			buf: Vec::new(),
			endianness,
			pointer_size,
		}
	}

	fn into_bytes(self) -> Vec<u8> {
		self.buf
	}

	fn raw(&mut self, bytes: &[u8]) {
		self.buf.extend_from_slice(bytes);
	}

	fn u16v(&mut self, value: u16) {
		match self.endianness {
			Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
			Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
		}
	}

	fn u32v(&mut self, value: u32) {
		match self.endianness {
			Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
			Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
		}
	}

	fn i32v(&mut self, value: i32) {
		self.u32v(value as u32);
	}

	fn u64v(&mut self, value: u64) {
		match self.endianness {
			Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
			Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
		}
	}

	fn f32v(&mut self, value: f32) {
		self.u32v(value.to_bits());
	}

	fn ptr(&mut self, value: u64) {
		match self.pointer_size {
			4 => {
				assert!(value <= u64::from(u32::MAX), "fixture address must fit 32 bits");
				self.u32v(value as u32);
			}
			_ => self.u64v(value),
		}
	}

	fn fixed_str(&mut self, text: &str, len: usize) {
		let bytes = text.as_bytes();
		assert!(bytes.len() < len, "fixture string must fit fixed array");
		self.buf.extend_from_slice(bytes);
		self.buf.resize(self.buf.len() + (len - bytes.len()), 0);
	}

	fn align4(&mut self) {
		while self.buf.len() % 4 != 0 {
			self.buf.push(0);
		}
	}
}
