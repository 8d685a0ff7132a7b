use serde::{Deserialize, Serialize};

/// 报告目标语言类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" | "英文" => Ok(TargetLanguage::English),
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "ja" | "japanese" | "日本語" | "日文" => Ok(TargetLanguage::Japanese),
            "de" | "german" | "deutsch" | "德文" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" | "法文" => Ok(TargetLanguage::French),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Chinese => "中文",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
        }
    }

    /// 获取语言的提示词指令
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::English => {
                "Write all generated analysis text in English, using accurate and professional business language."
            }
            TargetLanguage::Chinese => "请使用中文编写所有生成的分析内容，确保语言表达准确、专业。",
            TargetLanguage::Japanese => {
                "生成される分析テキストはすべて日本語で、正確で専門的なビジネス用語を使って記述してください。"
            }
            TargetLanguage::German => {
                "Verfassen Sie alle generierten Analysetexte auf Deutsch, in präziser und professioneller Geschäftssprache."
            }
            TargetLanguage::French => {
                "Rédigez tous les textes d'analyse générés en français, dans un langage commercial précis et professionnel."
            }
        }
    }
}
