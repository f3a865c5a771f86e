use crate::{engine::PoseTable, foundation::core::DVec3};

/// 128-bit digest of a pose table's exact bit patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PoseFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_poses(poses: &PoseTable) -> PoseFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    for (id, pose) in poses.iter() {
        write_u8_pair(&mut a, &mut b, id.index() as u8);
        write_vec3_pair(&mut a, &mut b, pose.position);
        let q = pose.orientation;
        for c in [q.x, q.y, q.z, q.w] {
            write_u64_pair(&mut a, &mut b, c.to_bits());
        }
    }

    PoseFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_vec3_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: DVec3) {
    for c in v.to_array() {
        write_u64_pair(a, b, c.to_bits());
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}
