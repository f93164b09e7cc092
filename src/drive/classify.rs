//! 目录树分类规则
//!
//! 纯函数集合：根据文件夹层级与命名关键词推导年份、学期、学科与类别。
//! 规则只依赖输入参数，方便单元测试覆盖。

use chrono::{DateTime, Datelike, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::drive::entities::Source;

/// 学期占位值：尚未进入学期目录时使用
pub const DEFAULT_SEMESTER: &str = "Semua Semester";

/// 学科占位值
pub const DEFAULT_SUBJECT: &str = "Umum";

/// 无名条目的兜底标题
pub const UNTITLED: &str = "Tanpa Nama";

static UTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bUTS\b").expect("Invalid UTS regex"));
static UAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bUAS\b").expect("Invalid UAS regex"));
static SEMESTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)semester|smt|sem\s|ganjil|genap").expect("Invalid semester regex"));
// 识别纯罗马数字或单个数字命名的学期目录（"I"、"II"、"2"）
static ROMAN_OR_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([IVX]+|\d)$").expect("Invalid semester number regex"));

/// 递归扫描时随目录层级传播的上下文
#[derive(Debug, Clone)]
pub struct WalkState {
    pub year: String,
    pub subject: String,
    pub semester: String,
}

impl WalkState {
    /// 进入年份目录时的初始上下文
    pub fn for_year(year: &str) -> Self {
        WalkState {
            year: year.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            semester: DEFAULT_SEMESTER.to_string(),
        }
    }

    /// 进入子目录后的新上下文
    ///
    /// 学期关键词只在年份目录的直接子层生效（此时学期仍为占位值）；
    /// 更深层的非 UTS/UAS 目录一律视为学科名。
    pub fn descend(&self, folder_name: &str) -> Self {
        let mut next = self.clone();
        let is_exam = UTS_RE.is_match(folder_name) || UAS_RE.is_match(folder_name);

        if self.semester == DEFAULT_SEMESTER {
            if SEMESTER_RE.is_match(folder_name) || ROMAN_OR_DIGIT_RE.is_match(folder_name) {
                next.semester = folder_name.to_string();
            } else if !is_exam {
                next.subject = folder_name.to_string();
            }
        } else if !is_exam {
            next.subject = folder_name.to_string();
        }

        next
    }
}

/// 解析文件类别
///
/// 优先级：文件名关键词 > 学科名关键词 > 来源默认值。
pub fn resolve_category(file_name: &str, subject: &str, source: Source) -> String {
    if UTS_RE.is_match(file_name) {
        "UTS".to_string()
    } else if UAS_RE.is_match(file_name) {
        "UAS".to_string()
    } else if UTS_RE.is_match(subject) {
        "UTS".to_string()
    } else if UAS_RE.is_match(subject) {
        "UAS".to_string()
    } else {
        source.default_category().to_string()
    }
}

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// 把 RFC3339 时间戳格式化为印尼语短日期（"5 Jan 2024"）
///
/// 缺失或无法解析的时间戳显示为 "-"。
pub fn format_date_id(created_time: Option<&str>) -> String {
    let Some(raw) = created_time else {
        return "-".to_string();
    };
    match DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        Ok(dt) => format!(
            "{} {} {}",
            dt.day(),
            MONTHS_ID[dt.month0() as usize],
            dt.year()
        ),
        Err(_) => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_marker_only_under_year() {
        let year = WalkState::for_year("Angkatan 2023");

        // 年份直下：罗马数字即学期
        let sem = year.descend("II");
        assert_eq!(sem.semester, "II");
        assert_eq!(sem.subject, DEFAULT_SUBJECT);

        // 学期目录之下同名目录就只能是学科
        let subject = sem.descend("Semester Pendek");
        assert_eq!(subject.semester, "II");
        assert_eq!(subject.subject, "Semester Pendek");
    }

    #[test]
    fn test_semester_keywords() {
        let year = WalkState::for_year("2024");
        assert_eq!(year.descend("Semester Ganjil").semester, "Semester Ganjil");
        assert_eq!(year.descend("smt 3").semester, "smt 3");
        assert_eq!(year.descend("Genap").semester, "Genap");
        // "Sem" 后面必须有空白字符
        assert_eq!(year.descend("Seminar Nasional").semester, DEFAULT_SEMESTER);
        assert_eq!(year.descend("Seminar Nasional").subject, "Seminar Nasional");
    }

    #[test]
    fn test_exam_folder_does_not_become_subject() {
        let year = WalkState::for_year("2023");
        let uts = year.descend("UTS");
        assert_eq!(uts.subject, DEFAULT_SUBJECT);
        assert_eq!(uts.semester, DEFAULT_SEMESTER);

        let deep = year.descend("I").descend("Kalkulus").descend("UAS 2023");
        assert_eq!(deep.subject, "Kalkulus");
    }

    #[test]
    fn test_resolve_category_word_boundary() {
        // 词边界匹配：连字符两侧算边界，驼峰内部不算
        assert_eq!(
            resolve_category("UAS-Statistika.pdf", "Umum", Source::Materi),
            "UAS"
        );
        assert_eq!(
            resolve_category("EvaluasiTugas.pdf", "Umum", Source::Materi),
            "Mata Kuliah"
        );
        assert_eq!(
            resolve_category("EvaluasiTugas.pdf", "Umum", Source::Jurnal),
            "Umum"
        );
    }

    #[test]
    fn test_resolve_category_priority() {
        // 文件名优先于学科名
        assert_eq!(
            resolve_category("Soal UTS.pdf", "UAS Kalkulus", Source::Materi),
            "UTS"
        );
        // 学科名优先于来源默认
        assert_eq!(
            resolve_category("latihan.pdf", "UAS Kalkulus", Source::Materi),
            "UAS"
        );
        assert_eq!(
            resolve_category("latihan.pdf", "Kalkulus", Source::Peralatan),
            "Umum"
        );
    }

    #[test]
    fn test_format_date_id() {
        assert_eq!(format_date_id(Some("2024-01-05T08:30:00Z")), "5 Jan 2024");
        assert_eq!(
            format_date_id(Some("2023-08-17T00:00:00+07:00")),
            "17 Agu 2023"
        );
        assert_eq!(format_date_id(Some("not-a-date")), "-");
        assert_eq!(format_date_id(None), "-");
    }
}
