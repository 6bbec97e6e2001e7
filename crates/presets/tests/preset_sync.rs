use presets::{reconcile, LabelCatalog, RemoteLabel};

fn catalog() -> LabelCatalog {
    LabelCatalog::preset().unwrap()
}

// ---- Converged / empty repositories ----

#[test]
fn empty_repository_needs_every_preset() {
    let catalog = catalog();
    let plan = reconcile(&[], &catalog);
    assert!(plan.updates.is_empty());
    assert_eq!(plan.missing.len(), catalog.len());
}

#[test]
fn canonical_repository_with_extras_is_converged() {
    let catalog = catalog();
    let mut remote: Vec<RemoteLabel> = catalog
        .labels()
        .map(|l| RemoteLabel::new(l.name(), l.description(), l.color()))
        .collect();
    remote.insert(0, RemoteLabel::new("good first issue", "", "7057ff"));
    remote.push(RemoteLabel::new("dependencies", "", "0366d6"));

    assert!(reconcile(&remote, &catalog).is_converged());
}

// ---- Drift ----

#[test]
fn default_platform_labels_are_adopted() {
    let catalog = catalog();
    let remote = vec![
        RemoteLabel::new("bug", "Something isn't working", "d73a4a"),
        RemoteLabel::new("documentation", "", "0075ca"),
        RemoteLabel::new("enhancement", "New feature or request", "a2eeef"),
        RemoteLabel::new("wontfix", "", "ffffff"),
    ];

    let plan = reconcile(&remote, &catalog);

    let renames: Vec<(&str, &str)> = plan
        .updates
        .iter()
        .map(|u| (u.old_name.as_str(), u.new_name.as_str()))
        .collect();
    assert_eq!(
        renames,
        vec![
            ("bug", "🐛 Issue.Bug"),
            ("wontfix", "🚫 Issue.WontFix"),
            ("documentation", "📝 Issue.Documentation"),
            ("enhancement", "⚡ Issue.Enhancement"),
        ]
    );

    let missing: Vec<&str> = plan.missing.iter().map(|l| l.name()).collect();
    assert_eq!(
        missing,
        vec![
            "👀 PR.ToReview",
            "✅ PR.ToMerge",
            "🚧 PR.OnGoing",
            "⏸️ PR.OnHold",
            "✨ Issue.Feature",
        ]
    );
}

#[test]
fn update_carries_canonical_description_and_color() {
    let catalog = catalog();
    let remote = vec![RemoteLabel::new("WIP", "", "cccccc")];

    let plan = reconcile(&remote, &catalog);

    let update = &plan.updates[0];
    assert_eq!(update.old_name, "WIP");
    assert_eq!(update.new_name, "🚧 PR.OnGoing");
    assert_eq!(update.description, "Work in progress");
    assert_eq!(update.color, "1D76DB");
}

#[test]
fn repeated_passes_over_one_snapshot_agree() {
    let catalog = catalog();
    let remote = vec![
        RemoteLabel::new("needs review", "", "ffffff"),
        RemoteLabel::new("Ready to merge", "", "ffffff"),
        RemoteLabel::new("bug", "", "ffffff"),
    ];

    let first = reconcile(&remote, &catalog);
    let second = reconcile(&remote, &catalog);

    assert_eq!(first, second);
    assert_eq!(first.updates.len(), 3);
}

#[test]
fn labels_with_opposite_meaning_are_left_alone() {
    let catalog = catalog();
    let remote = vec![
        RemoteLabel::new("do not merge", "", "b60205"),
        RemoteLabel::new("Merge Conflict", "", ""),
        RemoteLabel::new("review later", "", ""),
    ];

    let plan = reconcile(&remote, &catalog);

    assert!(plan.updates.is_empty());
    assert_eq!(plan.missing.len(), catalog.len());
}
