//! プリセット・クラウド設定・データセンターのデータモデル

mod cloud;
mod datacenter;
mod preset;
mod provider;
mod user;

pub use cloud::*;
pub use datacenter::*;
pub use preset::*;
pub use provider::*;
pub use user::*;
