//! Template engine for site pages

use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::dates;
use crate::error::{Error, Result};
use crate::validation::slugify;

/// Built-in templates, in dependency order
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("post.html", POST_TEMPLATE),
    ("archive.html", ARCHIVE_TEMPLATE),
    ("tags.html", TAGS_TEMPLATE),
    ("tag.html", TAG_TEMPLATE),
    ("not_found.html", NOT_FOUND_TEMPLATE),
];

/// Template engine wrapper
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create an engine with the built-in templates, overridden by any
    /// `*.html` file of the same name under `templates_dir`
    pub fn new(templates_dir: &Path) -> Result<Self> {
        let mut templates: Vec<(String, String)> = Vec::new();

        if templates_dir.is_dir() {
            for entry in WalkDir::new(templates_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let path = entry.path();
                if path.extension().map(|e| e != "html").unwrap_or(true) {
                    continue;
                }
                let Ok(relative) = path.strip_prefix(templates_dir) else {
                    continue;
                };
                let name = relative.to_string_lossy().replace('\\', "/");
                let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::debug!("Using custom template {}", name);
                templates.push((name, content));
            }
        }

        Self::with_templates(templates)
    }

    /// Create an engine with only the built-in templates
    pub fn builtin() -> Result<Self> {
        Self::with_templates(Vec::new())
    }

    fn with_templates(mut templates: Vec<(String, String)>) -> Result<Self> {
        for (name, content) in BUILTIN_TEMPLATES {
            if !templates.iter().any(|(existing, _)| existing == name) {
                templates.push((name.to_string(), content.to_string()));
            }
        }

        let mut tera = Tera::default();
        tera.register_filter("markdown", markdown_filter);
        tera.register_filter("format_date", format_date_filter);
        tera.register_filter("slugify", slugify_filter);
        // All at once so `{% extends %}` resolves regardless of order
        tera.add_raw_templates(templates)?;

        Ok(Self { tera })
    }

    /// Render a named template
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

/// Render markdown to HTML
pub fn markdown_to_html(text: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Tera filter to convert markdown to HTML
fn markdown_filter(value: &tera::Value, _args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    let text = value.as_str().unwrap_or("");
    Ok(tera::Value::String(markdown_to_html(text)))
}

fn format_date_filter(value: &tera::Value, _args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    match value.as_str() {
        Some(s) => Ok(tera::Value::String(dates::format_date(s))),
        None => Ok(value.clone()),
    }
}

/// Empty string when the text has no usable slug
fn slugify_filter(value: &tera::Value, _args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    let text = value.as_str().unwrap_or("");
    Ok(tera::Value::String(slugify(text).unwrap_or_default()))
}

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}{{ site.title }}{% endblock title %}</title>
    {% if site.description %}<meta name="description" content="{{ site.description }}">{% endif %}
    <style>
        body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; line-height: 1.6; }
        header { display: flex; justify-content: space-between; align-items: baseline; border-bottom: 1px solid #eee; margin-bottom: 2rem; }
        header nav a { margin-left: 1rem; }
        .post-list { list-style: none; padding: 0; }
        .post-item { padding: 1rem 0; border-bottom: 1px solid #eee; }
        .post-title { margin: 0 0 0.25rem; }
        .meta, time { color: #666; font-size: 0.9rem; }
        .tag { margin-right: 0.5rem; font-size: 0.85rem; }
        .tag-cloud a { display: inline-block; margin: 0 0.75rem 0.5rem 0; }
        .archive-year { margin-top: 2rem; }
        pre { overflow-x: auto; }
        .error { text-align: center; padding: 3rem 0; }
    </style>
    {% if site.highlight %}
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/gh/highlightjs/cdn-release@11.9.0/build/styles/github.min.css">
    <script src="https://cdn.jsdelivr.net/gh/highlightjs/cdn-release@11.9.0/build/highlight.min.js"></script>
    <script>document.addEventListener("DOMContentLoaded", function () { hljs.highlightAll(); });</script>
    {% endif %}
</head>
<body>
    <header>
        <a class="site-title" href="{{ base | safe }}">{{ site.title }}</a>
        <nav>
            <a href="{{ base | safe }}">Home</a>
            <a href="{{ base | safe }}archive/">Archive</a>
            <a href="{{ base | safe }}tags/">Tags</a>
        </nav>
    </header>
    <main>
{% block content %}{% endblock content %}
    </main>
</body>
</html>
"#;

const HOME_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block content %}
{% if site.description %}<p class="description">{{ site.description }}</p>{% endif %}
<ul class="post-list">
{% for post in posts %}
    <li class="post-item">
        <h2 class="post-title"><a href="{{ base | safe }}{{ post.url | safe }}">{{ post.title }}</a></h2>
        {% if post.date %}<time datetime="{{ post.date }}">{{ post.date_display }}</time>{% endif %}
        {% for tag in post.tags %}{% set tag_slug = tag | slugify %}{% if tag_slug %}<a class="tag" href="{{ base | safe }}tags/{{ tag_slug }}/">#{{ tag }}</a>{% else %}<span class="tag">#{{ tag }}</span>{% endif %}{% endfor %}
    </li>
{% endfor %}
</ul>
{% if not posts %}<p class="empty">No posts yet.</p>{% endif %}
{% endblock content %}
"#;

const POST_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}{{ post.title }} | {{ site.title }}{% endblock title %}
{% block content %}
<article>
    <h1>{{ post.title }}</h1>
    <div class="meta">
        {% if post.date %}<time datetime="{{ post.date }}">{{ post.date_display }}</time>{% endif %}
        {% for tag in post.tags %}{% set tag_slug = tag | slugify %}{% if tag_slug %}<a class="tag" href="{{ base | safe }}tags/{{ tag_slug }}/">#{{ tag }}</a>{% else %}<span class="tag">#{{ tag }}</span>{% endif %}{% endfor %}
    </div>
    <div class="content">
{{ body | markdown | safe }}
    </div>
</article>
{% endblock content %}
"#;

const ARCHIVE_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Archive | {{ site.title }}{% endblock title %}
{% block content %}
<h1>Archive</h1>
{% for group in archive %}
<section>
    <h2 class="archive-year">{{ group.year }}</h2>
    <ul class="post-list">
    {% for post in group.posts %}
        <li class="post-item">
            <time datetime="{{ post.date }}">{{ post.date_display }}</time>
            <a class="post-title" href="{{ base | safe }}{{ post.url | safe }}">{{ post.title }}</a>
        </li>
    {% endfor %}
    </ul>
</section>
{% endfor %}
{% if not archive %}<p class="empty">No dated posts yet.</p>{% endif %}
{% endblock content %}
"#;

const TAGS_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Tags | {{ site.title }}{% endblock title %}
{% block content %}
<h1>Tags</h1>
<div class="tag-cloud">
{% for entry in tags %}
    <a href="{{ base | safe }}tags/{{ entry.slug }}/" data-count="{{ entry.count }}">{{ entry.tag }} <sup>{{ entry.count }}</sup></a>
{% endfor %}
</div>
{% if not tags %}<p class="empty">No tags yet.</p>{% endif %}
{% endblock content %}
"#;

const TAG_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}#{{ tag.tag }} | {{ site.title }}{% endblock title %}
{% block content %}
<h1>Posts tagged #{{ tag.tag }}</h1>
<ul class="post-list">
{% for post in posts %}
    <li class="post-item">
        <h2 class="post-title"><a href="{{ base | safe }}{{ post.url | safe }}">{{ post.title }}</a></h2>
        {% if post.date %}<time datetime="{{ post.date }}">{{ post.date_display }}</time>{% endif %}
    </li>
{% endfor %}
</ul>
{% endblock content %}
"#;

const NOT_FOUND_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Not found | {{ site.title }}{% endblock title %}
{% block content %}
<div class="error">
    <h1>Page not found</h1>
    <p>Nothing lives at <code>{{ path }}</code>.</p>
    <p><a href="{{ base | safe }}">Back to all posts</a></p>
</div>
{% endblock content %}
"#;
