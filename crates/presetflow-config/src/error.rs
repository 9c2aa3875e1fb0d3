use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "プリセットマニフェストが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: presets.local.kdl, .presets.local.kdl, presets.kdl, .presets.kdl\n\
        - ./.presetflow/ ディレクトリ\n\
        - ~/.config/presetflow/presets.kdl\n\
        または PRESETFLOW_PRESETS_PATH 環境変数で直接指定できます"
    )]
    PresetsFileNotFound,

    #[error("設定の読み込みエラー: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
