// 🌐 Bilingual string lookup (Arabic / English)
//
// Static dictionaries, no runtime loading. Arabic is the default language
// and renders right-to-left.

use crate::error::{Result, TrackerError};
use crate::model::{Category, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    /// Text direction for the document root
    pub fn direction(&self) -> &'static str {
        match self {
            Language::Ar => "rtl",
            Language::En => "ltr",
        }
    }
}

impl FromStr for Language {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Language::Ar),
            "en" => Ok(Language::En),
            other => Err(TrackerError::validation(format!(
                "unsupported language '{}' (expected ar or en)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TranslationKey {
    AppTitle,
    AppSettings,
    AppLanguage,
    AppClose,
    ExpenseAdd,
    ExpenseEdit,
    ExpenseDescription,
    ExpenseCategory,
    ExpenseAmount,
    ExpenseDate,
    ExpenseStatus,
    ExpenseSave,
    ExpenseCancel,
    ExpenseDelete,
    ExpenseEditBtn,
    CategoryMaintenance,
    CategoryHome,
    CategoryOther,
    StatusPaid,
    StatusUnpaid,
    TableDescription,
    TableCategory,
    TableAmount,
    TableDate,
    TableStatus,
    TableActions,
    MessageNoExpenses,
    MessageError,
    MessageSuccess,
}

impl TranslationKey {
    pub const ALL: [TranslationKey; 29] = [
        TranslationKey::AppTitle,
        TranslationKey::AppSettings,
        TranslationKey::AppLanguage,
        TranslationKey::AppClose,
        TranslationKey::ExpenseAdd,
        TranslationKey::ExpenseEdit,
        TranslationKey::ExpenseDescription,
        TranslationKey::ExpenseCategory,
        TranslationKey::ExpenseAmount,
        TranslationKey::ExpenseDate,
        TranslationKey::ExpenseStatus,
        TranslationKey::ExpenseSave,
        TranslationKey::ExpenseCancel,
        TranslationKey::ExpenseDelete,
        TranslationKey::ExpenseEditBtn,
        TranslationKey::CategoryMaintenance,
        TranslationKey::CategoryHome,
        TranslationKey::CategoryOther,
        TranslationKey::StatusPaid,
        TranslationKey::StatusUnpaid,
        TranslationKey::TableDescription,
        TranslationKey::TableCategory,
        TranslationKey::TableAmount,
        TranslationKey::TableDate,
        TranslationKey::TableStatus,
        TranslationKey::TableActions,
        TranslationKey::MessageNoExpenses,
        TranslationKey::MessageError,
        TranslationKey::MessageSuccess,
    ];

    /// Dotted key as used by web clients
    pub fn as_str(&self) -> &'static str {
        use TranslationKey::*;
        match self {
            AppTitle => "app.title",
            AppSettings => "app.settings",
            AppLanguage => "app.language",
            AppClose => "app.close",
            ExpenseAdd => "expense.add",
            ExpenseEdit => "expense.edit",
            ExpenseDescription => "expense.description",
            ExpenseCategory => "expense.category",
            ExpenseAmount => "expense.amount",
            ExpenseDate => "expense.date",
            ExpenseStatus => "expense.status",
            ExpenseSave => "expense.save",
            ExpenseCancel => "expense.cancel",
            ExpenseDelete => "expense.delete",
            ExpenseEditBtn => "expense.edit_btn",
            CategoryMaintenance => "category.maintenance",
            CategoryHome => "category.home",
            CategoryOther => "category.other",
            StatusPaid => "status.paid",
            StatusUnpaid => "status.unpaid",
            TableDescription => "table.description",
            TableCategory => "table.category",
            TableAmount => "table.amount",
            TableDate => "table.date",
            TableStatus => "table.status",
            TableActions => "table.actions",
            MessageNoExpenses => "message.no_expenses",
            MessageError => "message.error",
            MessageSuccess => "message.success",
        }
    }
}

pub fn translate(language: Language, key: TranslationKey) -> &'static str {
    match language {
        Language::Ar => arabic(key),
        Language::En => english(key),
    }
}

pub fn category_label(language: Language, category: Category) -> &'static str {
    let key = match category {
        Category::Maintenance => TranslationKey::CategoryMaintenance,
        Category::Home => TranslationKey::CategoryHome,
        Category::Other => TranslationKey::CategoryOther,
    };
    translate(language, key)
}

pub fn status_label(language: Language, status: Status) -> &'static str {
    let key = match status {
        Status::Paid => TranslationKey::StatusPaid,
        Status::Unpaid => TranslationKey::StatusUnpaid,
    };
    translate(language, key)
}

/// Whole dictionary for one language, keyed by dotted key
pub fn dictionary(language: Language) -> BTreeMap<&'static str, &'static str> {
    TranslationKey::ALL
        .iter()
        .map(|key| (key.as_str(), translate(language, *key)))
        .collect()
}

fn arabic(key: TranslationKey) -> &'static str {
    use TranslationKey::*;
    match key {
        AppTitle => "تطبيق إدارة المصروفات",
        AppSettings => "الإعدادات",
        AppLanguage => "اللغة",
        AppClose => "إغلاق",
        ExpenseAdd => "إضافة مصروف جديد",
        ExpenseEdit => "تعديل المصروف",
        ExpenseDescription => "الوصف",
        ExpenseCategory => "الفئة",
        ExpenseAmount => "المبلغ (جنيه مصري)",
        ExpenseDate => "التاريخ",
        ExpenseStatus => "الحالة",
        ExpenseSave => "حفظ",
        ExpenseCancel => "إلغاء",
        ExpenseDelete => "حذف",
        ExpenseEditBtn => "تعديل",
        CategoryMaintenance => "أعمال صيانة",
        CategoryHome => "منزل",
        CategoryOther => "أخرى",
        StatusPaid => "مدفوع",
        StatusUnpaid => "غير مدفوع",
        TableDescription => "الوصف",
        TableCategory => "الفئة",
        TableAmount => "المبلغ",
        TableDate => "التاريخ",
        TableStatus => "الحالة",
        TableActions => "الإجراءات",
        MessageNoExpenses => "لا توجد مصروفات",
        MessageError => "حدث خطأ",
        MessageSuccess => "تم الحفظ بنجاح",
    }
}

fn english(key: TranslationKey) -> &'static str {
    use TranslationKey::*;
    match key {
        AppTitle => "Expense Tracker",
        AppSettings => "Settings",
        AppLanguage => "Language",
        AppClose => "Close",
        ExpenseAdd => "Add New Expense",
        ExpenseEdit => "Edit Expense",
        ExpenseDescription => "Description",
        ExpenseCategory => "Category",
        ExpenseAmount => "Amount (EGP)",
        ExpenseDate => "Date",
        ExpenseStatus => "Status",
        ExpenseSave => "Save",
        ExpenseCancel => "Cancel",
        ExpenseDelete => "Delete",
        ExpenseEditBtn => "Edit",
        CategoryMaintenance => "Maintenance Work",
        CategoryHome => "Home",
        CategoryOther => "Other",
        StatusPaid => "Paid",
        StatusUnpaid => "Unpaid",
        TableDescription => "Description",
        TableCategory => "Category",
        TableAmount => "Amount",
        TableDate => "Date",
        TableStatus => "Status",
        TableActions => "Actions",
        MessageNoExpenses => "No expenses found",
        MessageError => "An error occurred",
        MessageSuccess => "Saved successfully",
    }
}
