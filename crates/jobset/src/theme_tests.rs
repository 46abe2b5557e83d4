// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn explicit_name_always_wins() {
    let gen = NameGenerator::new(Theme::Lovecraft);
    assert_eq!(gen.generate(Some("widget")), "widget");
}

#[test]
fn generated_name_has_three_parts() {
    let gen = NameGenerator::new(Theme::Lovecraft);
    let name = gen.generate(None);
    assert_eq!(name.split('-').count(), 3);
}

#[test]
fn repeated_generation_is_not_constant() {
    let gen = NameGenerator::new(Theme::Nautical);
    let names: std::collections::HashSet<_> = (0..20).map(|_| gen.generate(None)).collect();
    assert!(names.len() > 1, "expected variety across 20 generated names, got {names:?}");
}

#[test]
fn default_theme_is_lovecraft() {
    assert_eq!(Theme::default(), Theme::Lovecraft);
}
