//! Fixture builder for synthetic Archive II byte streams.
//!
//! Builds volumes message by message: framed messages are concatenated,
//! bzip2-compressed into LDM records, and prefixed with the volume header.
//! Layouts follow the RDA/RPG and User ICDs, matching what the decoder
//! expects on the wire.

use std::io::Write;

use bzip2::write::BzEncoder;
use bzip2::Compression;

/// 24-byte volume header: "AR2V0006." + "001" + date/time + ICAO.
pub fn volume_header(icao: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(24);
    bytes.extend_from_slice(b"AR2V0006.");
    bytes.extend_from_slice(b"001");
    bytes.extend_from_slice(&19000i32.to_be_bytes());
    bytes.extend_from_slice(&43_200_000i32.to_be_bytes());
    bytes.extend_from_slice(icao.as_bytes());
    bytes
}

/// 12 bytes of CTM padding plus a 16-byte message header.
fn message_frame(message_type: u8, message_size: u16) -> Vec<u8> {
    let mut bytes = vec![0u8; 12];
    bytes.extend_from_slice(&message_size.to_be_bytes());
    bytes.push(0); // redundant channel
    bytes.push(message_type);
    bytes.extend_from_slice(&1u16.to_be_bytes()); // sequence number
    bytes.extend_from_slice(&19000u16.to_be_bytes());
    bytes.extend_from_slice(&43_200_000u32.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes()); // segments
    bytes.extend_from_slice(&1u16.to_be_bytes()); // segment number
    bytes
}

/// A complete framed Message 2: CTM, header, 68-byte body, record padding.
pub fn message2(rda_build: u16, vcp: u16) -> Vec<u8> {
    let mut bytes = message_frame(2, 34);
    let mut fields = [0u16; 27];
    fields[0] = 16; // operate
    fields[1] = 2; // on-line
    fields[7] = vcp;
    fields[9] = rda_build;
    for f in fields {
        bytes.extend_from_slice(&f.to_be_bytes());
    }
    bytes.extend_from_slice(&[0u8; 14]); // spares
    bytes.extend_from_slice(&vec![0u8; 2336]); // pad to record length
    bytes
}

/// A complete framed Message 3 with a recognizable body.
pub fn message3() -> Vec<u8> {
    let mut bytes = message_frame(3, 1202);
    bytes.extend_from_slice(&vec![0x5A; 2404]);
    bytes
}

/// A framed message of an arbitrary skipped type.
pub fn skipped_message(message_type: u8) -> Vec<u8> {
    let mut bytes = message_frame(message_type, 1216);
    bytes.extend_from_slice(&vec![0u8; 2404]);
    bytes
}

/// Builder for a framed Message 31.
pub struct RadialFixture {
    pub azimuth_number: u16,
    pub azimuth_angle: f32,
    pub elevation_number: u8,
    /// Pointer table entries; 9 for build 18, 10 for build 19 and newer.
    pub pointer_count: usize,
    blocks: Vec<Vec<u8>>,
}

impl RadialFixture {
    pub fn new(azimuth_number: u16, azimuth_angle: f32, elevation_number: u8) -> Self {
        Self {
            azimuth_number,
            azimuth_angle,
            elevation_number,
            pointer_count: 9,
            blocks: Vec::new(),
        }
    }

    pub fn pointer_count(mut self, count: usize) -> Self {
        self.pointer_count = count;
        self
    }

    /// Appends a volume metadata (VOL) block.
    pub fn with_volume_data(mut self, lat: f32, long: f32) -> Self {
        let mut block = Vec::new();
        block.push(b'R');
        block.extend_from_slice(b"VOL");
        block.extend_from_slice(&44u16.to_be_bytes()); // LRTUP
        block.push(1); // version major
        block.push(0); // version minor
        block.extend_from_slice(&lat.to_be_bytes());
        block.extend_from_slice(&long.to_be_bytes());
        block.extend_from_slice(&256u16.to_be_bytes()); // site height
        block.extend_from_slice(&20u16.to_be_bytes()); // feedhorn height
        block.extend_from_slice(&0f32.to_be_bytes()); // calibration constant
        block.extend_from_slice(&700f32.to_be_bytes()); // SHV TX power H
        block.extend_from_slice(&700f32.to_be_bytes()); // SHV TX power V
        block.extend_from_slice(&0f32.to_be_bytes()); // ZDR bias
        block.extend_from_slice(&0f32.to_be_bytes()); // initial phase
        block.extend_from_slice(&215u16.to_be_bytes()); // VCP
        block.extend_from_slice(&0u16.to_be_bytes()); // processing status
        self.blocks.push(block);
        self
    }

    /// Appends a generic moment block with 8-bit samples.
    pub fn with_moment(mut self, name: &[u8; 3], data: &[u8], offset: f32, scale: f32) -> Self {
        let mut block = Vec::new();
        block.push(b'D');
        block.extend_from_slice(name);
        block.extend_from_slice(&0u32.to_be_bytes()); // reserved
        block.extend_from_slice(&(data.len() as u16).to_be_bytes()); // gates
        block.extend_from_slice(&2125u16.to_be_bytes()); // first gate range
        block.extend_from_slice(&250u16.to_be_bytes()); // sample interval
        block.extend_from_slice(&0u16.to_be_bytes()); // tover
        block.extend_from_slice(&16u16.to_be_bytes()); // snr threshold
        block.push(0); // control flags
        block.push(8); // word size
        block.extend_from_slice(&scale.to_be_bytes());
        block.extend_from_slice(&offset.to_be_bytes());
        block.extend_from_slice(data);
        self.blocks.push(block);
        self
    }

    /// Appends a block with an arbitrary (possibly bogus) name.
    pub fn with_raw_block(mut self, name: &[u8; 3]) -> Self {
        let mut block = vec![b'D'];
        block.extend_from_slice(name);
        self.blocks.push(block);
        self
    }

    /// The complete framed message: CTM, header, radial, blocks.
    pub fn build(self) -> Vec<u8> {
        let mut bytes = message_frame(31, 0);
        bytes.extend_from_slice(b"KMPX");
        bytes.extend_from_slice(&43_200_000u32.to_be_bytes()); // collection time
        bytes.extend_from_slice(&19000u16.to_be_bytes()); // collection date
        bytes.extend_from_slice(&self.azimuth_number.to_be_bytes());
        bytes.extend_from_slice(&self.azimuth_angle.to_be_bytes());
        bytes.push(0); // compression indicator
        bytes.push(0); // spare
        bytes.extend_from_slice(&0u16.to_be_bytes()); // radial length
        bytes.push(1); // spacing code: 0.5 deg
        bytes.push(1); // radial status: intermediate
        bytes.push(self.elevation_number);
        bytes.push(0); // cut sector
        bytes.extend_from_slice(&0.5f32.to_be_bytes()); // elevation angle
        bytes.push(0); // spot blanking
        bytes.push(0); // indexing mode
        bytes.extend_from_slice(&(self.blocks.len() as u16).to_be_bytes());
        bytes.extend_from_slice(&vec![0u8; self.pointer_count * 4]);
        for block in &self.blocks {
            bytes.extend_from_slice(block);
        }
        bytes
    }
}

/// Compresses `payload` into a single bzip2 stream.
pub fn compress(payload: &[u8]) -> Vec<u8> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();
    encoder.finish().unwrap()
}

/// One LDM record: length word plus compressed messages.
pub fn ldm_record(messages: &[Vec<u8>]) -> Vec<u8> {
    let payload: Vec<u8> = messages.iter().flatten().copied().collect();
    let compressed = compress(&payload);
    frame_ldm(&compressed, compressed.len() as i32)
}

/// One LDM record with a negative length word.
pub fn ldm_record_negative_size(messages: &[Vec<u8>]) -> Vec<u8> {
    let payload: Vec<u8> = messages.iter().flatten().copied().collect();
    let compressed = compress(&payload);
    frame_ldm(&compressed, -(compressed.len() as i32))
}

/// One LDM record whose body is several concatenated bzip2 streams.
pub fn ldm_record_multi_stream(streams: &[Vec<u8>]) -> Vec<u8> {
    let compressed: Vec<u8> = streams.iter().flat_map(|s| compress(s)).collect();
    frame_ldm(&compressed, compressed.len() as i32)
}

fn frame_ldm(compressed: &[u8], size: i32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 + compressed.len());
    bytes.extend_from_slice(&size.to_be_bytes());
    bytes.extend_from_slice(compressed);
    bytes
}
