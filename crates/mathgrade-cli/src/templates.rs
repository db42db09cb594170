pub const GITIGNORE: &str = "\
.eval/
evaluation_results/
";
