//! 生成器模块
//!
//! 由种子确定性地生成完整的演示数据集。

pub mod data_generator;
pub mod reference;

pub use data_generator::{DataGenerator, Dataset, GenerationStats, GeneratorConfig};
