//! 确定性随机数生成器
//!
//! Mulberry32 算法：32 位状态，输出分布在 [0, 1) 的浮点数。
//! 相同种子总是产生相同的序列，从而生成完全一致的数据集。

use rand::{RngCore, SeedableRng};

/// Mulberry32 状态增量
const INCREMENT: u32 = 0x6D2B79F5;

/// 2^32，用于把 32 位输出映射到 [0, 1)
const TWO_POW_32: f64 = 4_294_967_296.0;

/// 带种子的伪随机数流
///
/// 只能通过重新设定种子来重启序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// 使用 32 位种子创建生成器
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// 产生下一个 32 位输出
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(1 | t);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(61 | r));
        r ^ (r >> 14)
    }

    /// 产生 [0, 1) 区间的浮点数
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / TWO_POW_32
    }

    /// 产生 [0, n) 区间的整数，`floor(r * n)`
    pub fn below(&mut self, n: u32) -> u32 {
        (self.next_f64() * f64::from(n)) as u32
    }

    /// 以概率 p 返回 true
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// 从非空切片中等概率选择一个元素
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = (self.next_f64() * items.len() as f64) as usize;
        &items[idx]
    }

    /// 在 [base, base + span) 内取值，`base + r * span`
    pub fn scaled(&mut self, base: f64, span: f64) -> f64 {
        base + self.next_f64() * span
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_raw());
        let high = u64::from(self.next_raw());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// 仅保留低 32 位，与 `seed >>> 0` 的语义一致
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_known_sequence() {
        let mut rng = Mulberry32::new(20260225);
        assert_eq!(rng.next_raw(), 4134020466);
        assert_eq!(rng.next_raw(), 389983530);
        assert_eq!(rng.next_raw(), 979002124);

        let mut rng = Mulberry32::new(1);
        assert_eq!(rng.next_raw(), 2693262067);
        assert_eq!(rng.next_raw(), 11749833);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Mulberry32::seed_from_u64(7);
        let mut b = Mulberry32::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = Mulberry32::new(99);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_seed_truncated_to_32_bits() {
        let mut wide = Mulberry32::seed_from_u64((1u64 << 32) + 5);
        let mut narrow = Mulberry32::new(5);
        assert_eq!(wide.next_raw(), narrow.next_raw());

        // 负数种子按补码截断
        let mut negative = Mulberry32::seed_from_u64(-1i64 as u64);
        let mut max = Mulberry32::new(u32::MAX);
        assert_eq!(negative.next_raw(), max.next_raw());
    }

    #[test]
    fn test_from_seed_matches_new() {
        let mut a = Mulberry32::from_seed(42u32.to_le_bytes());
        let mut b = Mulberry32::new(42);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_helpers_stay_in_bounds() {
        let mut rng = Mulberry32::new(3);
        let items = ["a", "b", "c"];
        for _ in 0..1000 {
            assert!(rng.below(10) < 10);
            assert!(items.contains(rng.pick(&items)));
            let v = rng.scaled(5.0, 10.0);
            assert!((5.0..15.0).contains(&v));
        }
    }

    #[test]
    fn test_works_with_rand_api() {
        let mut rng = Mulberry32::new(11);
        let mut buf = [0u8; 7];
        rng.fill_bytes(&mut buf);
        let n: u32 = rng.random_range(0..100);
        assert!(n < 100);
    }
}
