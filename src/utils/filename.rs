//! 发布文件命名规则

/// 标题截断上限
const TITLE_MAX_LEN: usize = 50;

/// 生成发布到云盘的文件名："{作者} - {清洗后的标题}.pdf"
///
/// 标题只保留 ASCII 字母、数字与空格，并截断到 50 个字符，
/// 避免云盘端出现非法或超长文件名。
pub fn publish_file_name(nama: &str, judul: &str) -> String {
    let clean: String = judul
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .take(TITLE_MAX_LEN)
        .collect();

    format!("{nama} - {clean}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_special_characters() {
        assert_eq!(
            publish_file_name("Budi", "Analisis: Jaringan (5G)!"),
            "Budi - Analisis Jaringan 5G.pdf"
        );
    }

    #[test]
    fn test_truncates_long_title() {
        let long_title = "a".repeat(120);
        let name = publish_file_name("Siti", &long_title);
        assert_eq!(name, format!("Siti - {}.pdf", "a".repeat(50)));
    }

    #[test]
    fn test_non_ascii_removed() {
        assert_eq!(
            publish_file_name("Dewi", "Kajian Budaya Ñusantara"),
            "Dewi - Kajian Budaya usantara.pdf"
        );
    }
}
