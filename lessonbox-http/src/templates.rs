use std::sync::Arc;

use tera::{Context, Tera};

/// Page templates, compiled into the binary
#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("home.html", include_str!("../templates/home.html")),
            ("lesson.html", include_str!("../templates/lesson.html")),
            ("404.html", include_str!("../templates/404.html")),
        ])?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(name, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonbox_core::lesson::Lesson;

    #[test]
    fn test_templates_compile() {
        assert!(Templates::new().is_ok());
    }

    #[test]
    fn test_lesson_page_escapes_code() {
        let templates = Templates::new().unwrap();
        let lesson = Lesson {
            id: "1".to_string(),
            title: "Variables".to_string(),
            description: String::new(),
            problem: "Assign x.".to_string(),
            boilerplate: String::new(),
            tests: vec![],
        };

        let mut context = Context::new();
        context.insert("lesson", &lesson);
        context.insert("code", "</textarea><script>alert(1)</script>");
        context.insert("report", &Option::<()>::None);
        context.insert("passed_count", &0);
        context.insert("hints_enabled", &false);

        let html = templates.render("lesson.html", &context).unwrap();
        assert!(html.contains("&lt;&#x2F;textarea&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(!html.contains("hint-button"));
    }
}
