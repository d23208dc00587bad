// Source - Producerに渡す文章の生成

use rand::Rng;

/// 生成対象の文章
pub const SENTENCES: [&str; 9] = [
    "Simple sentence 1",
    "Simple sentence 2",
    "Simple sentence 3",
    "Simple sentence 4",
    "Simple sentence 5",
    "Simple sentence 6",
    "Simple sentence 7",
    "Simple sentence 8",
    "Simple sentence 9",
];

/// 文章の選び方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentenceSource {
    /// 一様ランダムに選ぶ
    #[default]
    Random,
    /// 先頭から順に繰り返す（再現性が必要な場合）
    RoundRobin,
}

impl SentenceSource {
    /// `count`個の文章を生成
    pub fn generate(&self, count: usize) -> Vec<String> {
        match self {
            Self::Random => {
                let mut rng = rand::thread_rng();
                (0..count)
                    .map(|_| SENTENCES[rng.gen_range(0..SENTENCES.len())].to_string())
                    .collect()
            }
            Self::RoundRobin => (0..count)
                .map(|i| SENTENCES[i % SENTENCES.len()].to_string())
                .collect(),
        }
    }
}
