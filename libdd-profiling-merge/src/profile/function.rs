// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::*;

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Function {
    pub id: FunctionId,
    #[serde(default)]
    pub name: String,
    /// Usually the mangled name, if the runtime has one.
    #[serde(default)]
    pub system_name: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub start_line: i64,
}

impl Item for Function {
    type Id = FunctionId;

    fn id(&self) -> FunctionId {
        self.id
    }
}
