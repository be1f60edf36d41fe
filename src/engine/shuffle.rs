// ==========================================
// 排班生成系统 - 随机源与洗牌工具
// ==========================================
// 红线: 随机源由调用方持有并注入，禁止全局共享
// ==========================================

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 排班运行使用的随机源（可设定种子，结果可复现）
pub type RosterRng = ChaCha8Rng;

/// 按种子创建随机源
pub fn rng_from_seed(seed: u64) -> RosterRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// 随机生成种子并创建随机源
///
/// # 返回
/// (随机源, 实际使用的种子) —— 种子写入结果便于复现
pub fn rng_from_entropy() -> (RosterRng, u64) {
    let seed = rand::thread_rng().next_u64();
    (rng_from_seed(seed), seed)
}

/// 原地洗牌
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
}

/// 在键值最小的元素中等概率选一个
///
/// # 返回
/// 被选中元素的下标；items 为空时返回 None
pub fn pick_min_with_random_tie<T, K, F, R>(items: &[T], mut key: F, rng: &mut R) -> Option<usize>
where
    K: Ord,
    F: FnMut(&T) -> K,
    R: Rng + ?Sized,
{
    let keys: Vec<K> = items.iter().map(&mut key).collect();
    let min = keys.iter().min()?;
    let tied: Vec<usize> = keys
        .iter()
        .enumerate()
        .filter(|(_, k)| *k == min)
        .map(|(i, _)| i)
        .collect();
    tied.choose(rng).copied()
}
