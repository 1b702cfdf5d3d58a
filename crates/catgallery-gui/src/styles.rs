//! CSS 样式定义
//!
//! 粗边框、硬阴影的单列布局

/// 全局 CSS 样式
pub const GLOBAL_CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

:root {
    --primary: #FACC15;
    --secondary: #F472B6;
    --accent: #22D3EE;
    --error: #FB7185;
    --bg: #F8FAFC;
    --border: #000000;
    --shadow: 6px 6px 0px #000000;
    --shadow-sm: 4px 4px 0px #000000;
    --font-main: 'Outfit', 'Inter', sans-serif;
}

body {
    font-family: var(--font-main);
    background-color: var(--bg);
    color: var(--border);
    padding: 24px;
    line-height: 1.5;
}

.app-container {
    max-width: 760px;
    margin: 0 auto;
    display: flex;
    flex-direction: column;
    gap: 20px;
}

.bento-tile {
    background: white;
    border: 3px solid var(--border);
    box-shadow: var(--shadow);
    padding: 24px;
    position: relative;
    overflow: hidden;
}

.header-tile {
    background: var(--primary);
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 16px 24px;
}

.header-actions {
    display: flex;
    align-items: center;
    gap: 12px;
}

.error-tile {
    background: var(--error);
    color: white;
    text-align: center;
}

h1 { font-size: 32px; font-weight: 900; letter-spacing: -1px; }
h2 { font-size: 24px; font-weight: 800; margin-bottom: 16px; }
h3 { font-size: 16px; font-weight: 800; margin-bottom: 12px; text-transform: uppercase; }

/* Buttons */
.btn {
    font-family: inherit;
    font-weight: 800;
    padding: 12px 24px;
    border: 3px solid var(--border);
    box-shadow: var(--shadow-sm);
    cursor: pointer;
    background: white;
    transition: all 0.1s;
    text-transform: uppercase;
    display: inline-flex;
    align-items: center;
    justify-content: center;
    gap: 10px;
}

.btn:active {
    transform: translate(2px, 2px);
    box-shadow: 0px 0px 0px var(--border);
}

.btn:disabled {
    opacity: 0.5;
    cursor: not-allowed;
    transform: none;
    box-shadow: var(--shadow-sm);
}

.btn-primary { background: var(--primary); }
.btn-secondary { background: var(--secondary); }
.btn-accent { background: var(--accent); }
.btn-icon { padding: 6px 10px; box-shadow: 2px 2px 0px var(--border); }

.status-badge {
    background: white;
    border: 2px solid var(--border);
    padding: 6px 12px;
    font-weight: 700;
    box-shadow: 2px 2px 0px var(--border);
}

.status-badge.loading { animation: pulse 1.2s ease-in-out infinite; }

/* Notice */
.notice {
    border: 3px solid var(--border);
    background: white;
    padding: 12px 16px;
    font-weight: 700;
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 12px;
    box-shadow: var(--shadow-sm);
}

.notice.error { background: var(--error); color: white; }

/* Preview */
.preview-tile {
    padding: 16px;
    min-height: 420px;
    display: flex;
    align-items: center;
    justify-content: center;
}

.preview {
    width: 100%;
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 12px;
}

.preview-image {
    max-width: 100%;
    max-height: 520px;
    object-fit: contain;
    border: 3px solid var(--border);
    transition: opacity 0.2s;
}

.preview-image.dimmed { opacity: 0.4; }

.preview-caption {
    font-weight: 700;
    font-size: 14px;
    text-transform: uppercase;
}

.empty-state {
    text-align: center;
    padding: 40px;
}

.empty-state-icon { font-size: 64px; margin-bottom: 12px; }
.empty-state-text { font-weight: 700; }

/* Controls */
.controls-tile {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 20px;
}

.nav-controls {
    display: flex;
    gap: 16px;
}

.wallpaper-btn { min-width: 220px; min-height: 52px; }

/* Settings */
.settings-grid {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 24px;
}

.field {
    display: flex;
    align-items: center;
    gap: 10px;
    margin-bottom: 12px;
    font-weight: 600;
}

.field select {
    font-family: inherit;
    border: 2px solid var(--border);
    padding: 6px 8px;
    background: white;
}

.hint { font-size: 14px; margin-bottom: 12px; word-break: break-all; }

@keyframes spin {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}

@keyframes pulse {
    0%, 100% { opacity: 1; }
    50% { opacity: 0.5; }
}

.spinner {
    width: 40px;
    height: 40px;
    border: 4px solid var(--border);
    border-top: 4px solid var(--primary);
    border-radius: 50%;
    animation: spin 1s linear infinite;
}

.spinner-sm {
    width: 22px;
    height: 22px;
    border-width: 3px;
    border-top-color: white;
}
"#;
