// All prompt and user-facing message constants for the dispatch module.
// The instruction strings are product copy and are sent verbatim as the
// system turn.

/// System instruction for the marketing strategist role.
pub const MARKETING_STRATEGIST_SYSTEM: &str =
    "あなたは厳密なデータドリブン思考のマーケティング戦略家です。\
    市場分析、ペルソナ、4P/3C、ファネル、CAC/LTVを踏まえ、\
    実行可能な打ち手を見出し、根拠を簡潔に提示してください。\
    日本語で、具体例と簡単なチェックリストも添えて答えてください。";

/// System instruction for the software architect role.
pub const SOFTWARE_ARCHITECT_SYSTEM: &str =
    "あなたは堅牢で拡張可能な設計を重視するソフトウェアアーキテクトです。\
    要件の分解、非機能要件、アーキテクチャ選定、データ設計、\
    トレードオフを明示しながら、日本語でステップごとに提案してください。";

/// User-turn template. Replace `{user_text}` before sending.
pub const USER_PROMPT_TEMPLATE: &str =
    "ユーザー入力:\n{user_text}\n\n上記に日本語で回答してください。";

/// Returned as the reply whenever the API key is absent. Names both
/// configuration routes, local and hosted.
pub const MISSING_CREDENTIAL_NOTICE: &str =
    "【エラー】OpenAI APIキーが見つかりませんでした。\n\
    ローカルは .env に OPENAI_API_KEY=xxxxx を設定、\n\
    サーバーは secrets.toml に OPENAI_API_KEY を登録してください。";

/// Warning shown when the free-text field is blank. Shared by the form
/// script and the consult handler.
pub const BLANK_INPUT_WARNING: &str = "テキストを入力してください。";
