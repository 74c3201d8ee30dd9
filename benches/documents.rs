use iai::{black_box, main};

use htmlcheck::{resolve_positions, AttributeGroup, TagRule, Validator};

const ARTICLE: &str = r#"<!DOCTYPE html>
<article class="post" data-id="42">
  <h1 id="title">Release notes</h1>
  <p>Lots of <em>small</em> fixes and <a href="/changes" onclick="track()">one big one</a>.</p>
  <!-- draft: more to come -->
  <ul>
    <li><code>validate</code> got faster</li>
    <li>Images: <img src="chart.png" alt="chart"></li>
  </ul>
  <style>p > em { color: red }</style>
  <p style="x" hreff="y">broken <b>markup</p>
</article>
"#;

fn validator() -> Validator {
    let mut validator = Validator::new();
    validator
        .add_group(AttributeGroup::new("events").attrs(["onclick", "onmouseover"]))
        .unwrap();
    validator
        .add_valid_tag(
            TagRule::global()
                .attrs(["id", "class"])
                .groups(["events"])
                .attr_prefix("data-"),
        )
        .unwrap();
    for tag in ["article", "h1", "p", "em", "ul", "li", "code", "b", "style"] {
        validator.add_valid_tag(TagRule::new(tag)).unwrap();
    }
    validator
        .add_valid_tag(TagRule::new("a").attrs(["href"]))
        .unwrap();
    validator
        .add_valid_tag(TagRule::new("img").attrs(["src", "alt"]).self_closing(true))
        .unwrap();
    validator
}

fn document(i: usize, with_positions: bool) {
    let validator = validator();
    let s: String = black_box((0..i).map(|_| ARTICLE).collect());
    let mut errors = validator.validate(&s);
    if with_positions {
        resolve_positions(&s, &mut errors);
    }
    black_box(errors);
}

fn article_10() {
    document(10, false)
}

fn article_100() {
    document(100, false)
}

fn article_100_positions() {
    document(100, true)
}

main!(article_10, article_100, article_100_positions);
