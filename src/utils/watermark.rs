//! PDF 水印
//!
//! 发布前给每一页叠加两层文字：页脚署名行与居中的大号斜向印章。
//! 通过追加独立内容流实现，不改动原有页面内容。

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::errors::Result;

/// A4 兜底页面尺寸（找不到 MediaBox 时使用）
const A4_WIDTH: f32 = 595.276;
const A4_HEIGHT: f32 = 841.89;

/// 45° 旋转矩阵分量
const ROTATE_45: f32 = 0.7071;

const FONT_KEY: &str = "WmF";
const GS_FOOTER_KEY: &str = "WmGsF";
const GS_STAMP_KEY: &str = "WmGsS";

/// 给 PDF 的每一页叠加水印，返回新的文件内容
pub fn watermark_pdf(input: &[u8], footer_text: &str, stamp_text: &str) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(input)?;

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    // 页脚与印章各用一组透明度参数
    let gs_footer_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => Object::Real(0.6),
        "CA" => Object::Real(0.6),
    });
    let gs_stamp_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => Object::Real(0.2),
        "CA" => Object::Real(0.2),
    });

    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    for page_id in page_ids {
        let (width, height) = page_size(&doc, page_id);

        // 每页换成独立的 Resources 副本，只增不改，避免影响共享同一资源的其他页
        let mut resources = resolved_resources(&doc, page_id)?;
        subdict_set(&mut resources, "Font", FONT_KEY, font_id);
        subdict_set(&mut resources, "ExtGState", GS_FOOTER_KEY, gs_footer_id);
        subdict_set(&mut resources, "ExtGState", GS_STAMP_KEY, gs_stamp_id);

        let content = Content {
            operations: watermark_operations(footer_text, stamp_text, width, height),
        };
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        page.set("Resources", resources);
        match page.get_mut(b"Contents") {
            Ok(Object::Reference(rid)) => {
                let existing = *rid;
                page.set(
                    "Contents",
                    vec![Object::Reference(existing), Object::Reference(stream_id)],
                );
            }
            Ok(Object::Array(streams)) => streams.push(Object::Reference(stream_id)),
            _ => page.set("Contents", Object::Reference(stream_id)),
        }
    }

    let mut output = Vec::new();
    doc.save_to(&mut output)?;
    Ok(output)
}

/// 两层水印的绘制指令
fn watermark_operations(
    footer_text: &str,
    stamp_text: &str,
    width: f32,
    height: f32,
) -> Vec<Operation> {
    vec![
        // 页脚署名行：左下角，小号蓝字
        Operation::new("q", vec![]),
        Operation::new("gs", vec![Object::Name(GS_FOOTER_KEY.into())]),
        Operation::new(
            "rg",
            vec![
                Object::Real(0.2),
                Object::Real(0.2),
                Object::Real(0.8),
            ],
        ),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_KEY.into()), Object::Integer(10)],
        ),
        Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Real(50.0),
                Object::Real(30.0),
            ],
        ),
        Operation::new("Tj", vec![Object::string_literal(footer_text)]),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
        // 居中印章：45° 斜向，大号灰字
        Operation::new("q", vec![]),
        Operation::new("gs", vec![Object::Name(GS_STAMP_KEY.into())]),
        Operation::new(
            "rg",
            vec![
                Object::Real(0.5),
                Object::Real(0.5),
                Object::Real(0.5),
            ],
        ),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_KEY.into()), Object::Integer(35)],
        ),
        Operation::new(
            "Tm",
            vec![
                Object::Real(ROTATE_45),
                Object::Real(ROTATE_45),
                Object::Real(-ROTATE_45),
                Object::Real(ROTATE_45),
                Object::Real(width / 2.0 - 150.0),
                Object::Real(height / 2.0),
            ],
        ),
        Operation::new("Tj", vec![Object::string_literal(stamp_text)]),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
    ]
}

/// 沿 Parent 链解析可继承的页面属性
fn inherited_attr(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = page_id;
    loop {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return match value {
                Object::Reference(rid) => doc.get_object(*rid).ok().cloned(),
                other => Some(other.clone()),
            };
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return None,
        }
    }
}

/// 页面尺寸，取不到 MediaBox 时按 A4 处理
fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = match inherited_attr(doc, page_id, b"MediaBox") {
        Some(Object::Array(values)) if values.len() == 4 => values,
        _ => return (A4_WIDTH, A4_HEIGHT),
    };

    let as_f32 = |obj: &Object| match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        _ => 0.0,
    };

    let width = as_f32(&media_box[2]) - as_f32(&media_box[0]);
    let height = as_f32(&media_box[3]) - as_f32(&media_box[1]);
    if width <= 0.0 || height <= 0.0 {
        (A4_WIDTH, A4_HEIGHT)
    } else {
        (width, height)
    }
}

/// 页面 Resources 的解析副本（子字典引用一并展开）
fn resolved_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut resources = match inherited_attr(doc, page_id, b"Resources") {
        Some(Object::Dictionary(dict)) => dict,
        _ => Dictionary::new(),
    };

    for key in [b"Font".as_slice(), b"ExtGState".as_slice()] {
        if let Ok(Object::Reference(rid)) = resources.get(key) {
            let sub = doc.get_dictionary(*rid)?.clone();
            resources.set(key, sub);
        }
    }

    Ok(resources)
}

/// 向 Resources 的子字典插入一个引用条目
fn subdict_set(resources: &mut Dictionary, key: &str, name: &str, value: ObjectId) {
    if let Ok(Object::Dictionary(sub)) = resources.get_mut(key.as_bytes()) {
        sub.set(name, Object::Reference(value));
        return;
    }
    let mut sub = Dictionary::new();
    sub.set(name, Object::Reference(value));
    resources.set(key, sub);
}

/// 测试用的单页最小 PDF
#[cfg(test)]
pub(crate) mod pdf_fixture {
    use super::*;

    pub(crate) fn minimal_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 48.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal("Hello World!")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }
}
